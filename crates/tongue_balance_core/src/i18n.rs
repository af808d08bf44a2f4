//! crates/tongue_balance_core/src/i18n.rs
//!
//! Static translation table. No logic beyond picking the table for a language.

use serde::Serialize;

use crate::domain::Language;

/// Returns the string table for `language`.
pub fn translations(language: Language) -> &'static Translations {
    match language {
        Language::En => &EN,
        Language::Zh => &ZH,
        Language::Fr => &FR,
    }
}

/// Every display string of the interface, for one language.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translations {
    pub app_name: &'static str,
    pub hello: &'static str,
    pub login: &'static str,
    pub logout: &'static str,
    pub shang_yi: &'static str,
    pub hero_title: &'static str,
    pub hero_title_suffix: &'static str,
    pub hero_desc: &'static str,
    pub start_diagnosis: &'static str,
    pub dashboard_title: &'static str,
    pub dashboard_desc: &'static str,
    pub tip: &'static str,
    pub tip_desc: &'static str,
    pub center: &'static str,
    pub center_desc: &'static str,
    pub sides: &'static str,
    pub sides_desc: &'static str,
    pub root: &'static str,
    pub root_desc: &'static str,
    pub decoding_title: &'static str,
    pub decoding_desc: &'static str,
    pub color: &'static str,
    pub color_desc: &'static str,
    pub color_red: &'static str,
    pub color_pale: &'static str,
    pub color_purple: &'static str,
    pub shape: &'static str,
    pub shape_desc: &'static str,
    pub shape_swollen: &'static str,
    pub shape_thin: &'static str,
    pub shape_teeth: &'static str,
    pub coating: &'static str,
    pub coating_desc: &'static str,
    pub coating_yellow: &'static str,
    pub coating_white: &'static str,
    pub coating_peeled: &'static str,
    pub ready_title: &'static str,
    pub ready_desc: &'static str,
    pub start_free: &'static str,
    pub upload_title: &'static str,
    pub upload_desc: &'static str,
    pub tap_to_upload: &'static str,
    pub format_support: &'static str,
    pub click_to_change: &'static str,
    pub symptoms_label: &'static str,
    pub symptoms_placeholder: &'static str,
    pub voice_listening: &'static str,
    pub voice_start: &'static str,
    pub analyze_btn: &'static str,
    pub analyzing: &'static str,
    pub login_note: &'static str,
    pub error: &'static str,
    pub diagnosis_result: &'static str,
    pub pattern_analysis: &'static str,
    pub clinical_observation: &'static str,
    pub tongue_body: &'static str,
    pub tongue_coating: &'static str,
    pub wellness_plan: &'static str,
    pub dietary_guidance: &'static str,
    pub beneficial: &'static str,
    pub avoid: &'static str,
    pub lifestyle_exercise: &'static str,
    pub premium_rec: &'static str,
    pub start_course: &'static str,
    pub analyze_another: &'static str,
    pub history_title: &'static str,
    pub no_records: &'static str,
    pub start_journey: &'static str,
    pub welcome_back: &'static str,
    pub join_journey: &'static str,
    pub continue_path: &'static str,
    pub create_record: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub enter_username: &'static str,
    pub enter_password: &'static str,
    pub sign_in: &'static str,
    pub sign_up: &'static str,
    pub create_account: &'static str,
    pub dont_have_account: &'static str,
    pub already_have_account: &'static str,
    pub unknown: &'static str,
    pub none_specified: &'static str,
    pub general_rest: &'static str,
    pub general_wellness: &'static str,
    pub no_explanation: &'static str,
    pub voice_unsupported: &'static str,
}

static EN: Translations = Translations {
    app_name: "Shang Yi AI",
    hello: "Hello",
    login: "Login",
    logout: "Logout",
    shang_yi: "Shang Yi Zhi Wei Bing",
    hero_title: "Balance Your Body",
    hero_title_suffix: "Before It Breaks",
    hero_desc: "The tongue is the only muscle we can see that connects directly to our internal organs. It acts as a real-time dashboard for your holistic health.",
    start_diagnosis: "Start Diagnosis",
    dashboard_title: "Your Internal Dashboard",
    dashboard_desc: "Hover over the map to see how your tongue reflects your organs.",
    tip: "Tip (Heart & Lungs)",
    tip_desc: "Redness here often indicates anxiety, insomnia, or respiratory heat.",
    center: "Center (Spleen & Stomach)",
    center_desc: "A thick coating here suggests digestive stagnation or dampness.",
    sides: "Sides (Liver)",
    sides_desc: "Swollen or red sides can indicate high stress, anger, or stagnation.",
    root: "Root (Kidney)",
    root_desc: "Peeled coating here often reflects exhaustion or adrenal fatigue.",
    decoding_title: "Decoding the Signs",
    decoding_desc: "How our AI reads your body's language.",
    color: "Color",
    color_desc: "Reflects the condition of your blood and temperature.",
    color_red: "Red: Excess Heat/Inflammation.",
    color_pale: "Pale: Cold/Deficiency.",
    color_purple: "Purple: Stagnation/Poor Circulation.",
    shape: "Shape",
    shape_desc: "Indicates the state of Qi (Energy) and fluids.",
    shape_swollen: "Swollen: Dampness/Fluid Retention.",
    shape_thin: "Thin: Blood/Yin Deficiency.",
    shape_teeth: "Teeth Marks: Spleen Qi Deficiency.",
    coating: "Coating",
    coating_desc: "Reflects the digestive system and pathogen depth.",
    coating_yellow: "Yellow: Heat Accumulation.",
    coating_white: "White/Thick: Cold/Dampness.",
    coating_peeled: "Peeled/None: Yin Deficiency.",
    ready_title: "Ready to understand your body?",
    ready_desc: "Upload a simple photo and get a comprehensive TCM analysis in seconds.",
    start_free: "Start Free Analysis",
    upload_title: "Upload Your Tongue Image",
    upload_desc: "For best results, take the photo in natural light, relax your tongue, and ensure it's fully visible.",
    tap_to_upload: "Tap to Upload Photo",
    format_support: "JPG or PNG supported",
    click_to_change: "Click to change",
    symptoms_label: "Current Symptoms (Optional)",
    symptoms_placeholder: "e.g., I have trouble sleeping, feel bloated after meals, sweating easily...",
    voice_listening: "Listening...",
    voice_start: "Tap mic to speak",
    analyze_btn: "Reveal My Balance",
    analyzing: "Analyzing Pattern...",
    login_note: "Note: You are not logged in. Result will not be saved permanently.",
    error: "Failed to analyze image. Please try again with a clearer photo.",
    diagnosis_result: "Diagnosis Result",
    pattern_analysis: "Pattern Analysis",
    clinical_observation: "Clinical Observation",
    tongue_body: "Tongue Body",
    tongue_coating: "Tongue Coating",
    wellness_plan: "Wellness Plan",
    dietary_guidance: "Dietary Guidance",
    beneficial: "Beneficial",
    avoid: "Avoid",
    lifestyle_exercise: "Lifestyle & Exercise",
    premium_rec: "Premium Recommendation",
    start_course: "Start Course",
    analyze_another: "Analyze Another Image",
    history_title: "Your Journey",
    no_records: "No records yet.",
    start_journey: "Start your wellness journey by analyzing your tongue.",
    welcome_back: "Welcome Back",
    join_journey: "Join the Journey",
    continue_path: "Continue your path to wellness",
    create_record: "Create your personal health record",
    username: "Username",
    password: "Password",
    enter_username: "Enter your username",
    enter_password: "Enter your password",
    sign_in: "Sign In",
    sign_up: "Sign Up",
    create_account: "Create Account",
    dont_have_account: "Don't have an account? ",
    already_have_account: "Already have an account? ",
    unknown: "Unknown",
    none_specified: "None specified",
    general_rest: "General rest",
    general_wellness: "Wellness Basics",
    no_explanation: "No detailed explanation available.",
    voice_unsupported: "Voice input is not supported.",
};

static ZH: Translations = Translations {
    app_name: "上医 AI",
    hello: "你好",
    login: "登录",
    logout: "登出",
    shang_yi: "上医治未病",
    hero_title: "调理身体",
    hero_title_suffix: "防患于未然",
    hero_desc: "舌头是唯一可以直接看到的与内脏连接的肌肉。它是您整体健康的实时仪表盘。",
    start_diagnosis: "开始诊断",
    dashboard_title: "您的内在仪表盘",
    dashboard_desc: "悬停在地图上，查看舌头如何反映您的器官。",
    tip: "舌尖 (心肺)",
    tip_desc: "此处发红常表示焦虑、失眠或心肺有热。",
    center: "舌中 (脾胃)",
    center_desc: "此处苔厚建议消化停滞或湿气重。",
    sides: "舌边 (肝胆)",
    sides_desc: "舌边肿胀或发红可能表示压力大、愤怒或气滞。",
    root: "舌根 (肾)",
    root_desc: "此处剥苔常反映疲惫或肾虚。",
    decoding_title: "解读信号",
    decoding_desc: "我们的 AI 如何解读您的身体语言。",
    color: "舌色",
    color_desc: "反映血气状况和寒热。",
    color_red: "红: 实热/炎症。",
    color_pale: "淡白: 虚寒/气血不足。",
    color_purple: "紫: 气滞血瘀/循环不畅。",
    shape: "舌形",
    shape_desc: "指示气（能量）和津液的状态。",
    shape_swollen: "胖大: 湿气/水肿。",
    shape_thin: "瘦薄: 血虚/阴虚。",
    shape_teeth: "齿痕: 脾气虚。",
    coating: "舌苔",
    coating_desc: "反映消化系统和病邪深浅。",
    coating_yellow: "黄: 热积。",
    coating_white: "白/厚: 寒/湿。",
    coating_peeled: "剥落/无苔: 阴虚。",
    ready_title: "准备好了解您的身体了吗？",
    ready_desc: "上传一张简单的照片，几秒钟内获得全面的中医分析。",
    start_free: "开始免费分析",
    upload_title: "上传您的舌像",
    upload_desc: "为了获得最佳效果，请在自然光下拍摄，放松舌头，并确保完全可见。",
    tap_to_upload: "点击上传照片",
    format_support: "支持 JPG 或 PNG",
    click_to_change: "点击更换",
    symptoms_label: "当前症状（可选）",
    symptoms_placeholder: "例如：我睡眠不好，饭后腹胀，容易出汗...",
    voice_listening: "正在聆听...",
    voice_start: "点击麦克风说话",
    analyze_btn: "揭示我的体质",
    analyzing: "正在分析...",
    login_note: "注意：您未登录。结果将不会永久保存。",
    error: "分析图像失败。请用更清晰的照片重试。",
    diagnosis_result: "诊断结果",
    pattern_analysis: "体质分析",
    clinical_observation: "临床观察",
    tongue_body: "舌质",
    tongue_coating: "舌苔",
    wellness_plan: "调理方案",
    dietary_guidance: "饮食指导",
    beneficial: "宜食",
    avoid: "忌食",
    lifestyle_exercise: "生活方式与运动",
    premium_rec: "高级推荐",
    start_course: "开始课程",
    analyze_another: "分析另一张图片",
    history_title: "您的历程",
    no_records: "暂无记录。",
    start_journey: "通过分析您的舌头开始您的健康之旅。",
    welcome_back: "欢迎回来",
    join_journey: "加入旅程",
    continue_path: "继续您的健康之路",
    create_record: "创建您的个人健康档案",
    username: "用户名",
    password: "密码",
    enter_username: "输入您的用户名",
    enter_password: "输入您的密码",
    sign_in: "登录",
    sign_up: "注册",
    create_account: "创建账户",
    dont_have_account: "还没有账户？",
    already_have_account: "已有账户？",
    unknown: "未知",
    none_specified: "未指定",
    general_rest: "注意休息",
    general_wellness: "基础养生",
    no_explanation: "暂无详细说明。",
    voice_unsupported: "不支持语音输入。",
};

static FR: Translations = Translations {
    app_name: "Shang Yi AI",
    hello: "Bonjour",
    login: "Connexion",
    logout: "Déconnexion",
    shang_yi: "Shang Yi Zhi Wei Bing",
    hero_title: "Équilibrez Votre Corps",
    hero_title_suffix: "Avant Qu'il Ne Cède",
    hero_desc: "La langue est le seul muscle visible directement relié à nos organes internes. Elle agit comme un tableau de bord en temps réel pour votre santé holistique.",
    start_diagnosis: "Commencer le Diagnostic",
    dashboard_title: "Votre Tableau de Bord Interne",
    dashboard_desc: "Survolez la carte pour voir comment votre langue reflète vos organes.",
    tip: "Pointe (Cœur & Poumons)",
    tip_desc: "Une rougeur ici indique souvent de l'anxiété, de l'insomnie ou une chaleur respiratoire.",
    center: "Centre (Rate & Estomac)",
    center_desc: "Un enduit épais ici suggère une stagnation digestive ou de l'humidité.",
    sides: "Côtés (Foie)",
    sides_desc: "Des côtés enflés ou rouges peuvent indiquer un stress élevé, de la colère ou une stagnation.",
    root: "Racine (Reins)",
    root_desc: "Un enduit pelé ici reflète souvent l'épuisement ou une fatigue surrénale.",
    decoding_title: "Décoder les Signes",
    decoding_desc: "Comment notre IA lit le langage de votre corps.",
    color: "Couleur",
    color_desc: "Reflète l'état de votre sang et la température.",
    color_red: "Rouge: Excès de Chaleur/Inflammation.",
    color_pale: "Pâle: Froid/Déficience.",
    color_purple: "Violet: Stagnation/Mauvaise Circulation.",
    shape: "Forme",
    shape_desc: "Indique l'état du Qi (Énergie) et des fluides.",
    shape_swollen: "Enflée: Humidité/Rétention d'eau.",
    shape_thin: "Fine: Déficience de Sang/Yin.",
    shape_teeth: "Marques de Dents: Déficience du Qi de la Rate.",
    coating: "Enduit",
    coating_desc: "Reflète le système digestif et la profondeur des pathogènes.",
    coating_yellow: "Jaune: Accumulation de Chaleur.",
    coating_white: "Blanc/Épais: Froid/Humidité.",
    coating_peeled: "Pelé/Aucun: Déficience de Yin.",
    ready_title: "Prêt à comprendre votre corps ?",
    ready_desc: "Téléchargez une simple photo et obtenez une analyse MTC complète en quelques secondes.",
    start_free: "Analyse Gratuite",
    upload_title: "Téléchargez l'Image de Votre Langue",
    upload_desc: "Pour de meilleurs résultats, prenez la photo à la lumière naturelle, détendez votre langue et assurez-vous qu'elle est entièrement visible.",
    tap_to_upload: "Appuyez pour Télécharger",
    format_support: "JPG ou PNG supportés",
    click_to_change: "Cliquez pour changer",
    symptoms_label: "Symptômes Actuels (Optionnel)",
    symptoms_placeholder: "ex: J'ai du mal à dormir, je me sens ballonné après les repas, je transpire facilement...",
    voice_listening: "Écoute...",
    voice_start: "Appuyez pour parler",
    analyze_btn: "Révéler Mon Équilibre",
    analyzing: "Analyse du Modèle...",
    login_note: "Note: Vous n'êtes pas connecté. Le résultat ne sera pas sauvegardé de façon permanente.",
    error: "Échec de l'analyse de l'image. Veuillez réessayer avec une photo plus claire.",
    diagnosis_result: "Résultat du Diagnostic",
    pattern_analysis: "Analyse du Modèle",
    clinical_observation: "Observation Clinique",
    tongue_body: "Corps de la Langue",
    tongue_coating: "Enduit de la Langue",
    wellness_plan: "Plan de Bien-être",
    dietary_guidance: "Conseils Diététiques",
    beneficial: "Bénéfique",
    avoid: "À Éviter",
    lifestyle_exercise: "Mode de Vie & Exercice",
    premium_rec: "Recommandation Premium",
    start_course: "Commencer le Cours",
    analyze_another: "Analyser une Autre Image",
    history_title: "Votre Parcours",
    no_records: "Aucun enregistrement pour le moment.",
    start_journey: "Commencez votre parcours de bien-être en analysant votre langue.",
    welcome_back: "Bon Retour",
    join_journey: "Rejoignez l'Aventure",
    continue_path: "Continuez votre chemin vers le bien-être",
    create_record: "Créez votre dossier de santé personnel",
    username: "Nom d'utilisateur",
    password: "Mot de passe",
    enter_username: "Entrez votre nom d'utilisateur",
    enter_password: "Entrez votre mot de passe",
    sign_in: "Se Connecter",
    sign_up: "S'inscrire",
    create_account: "Créer un Compte",
    dont_have_account: "Vous n'avez pas de compte ? ",
    already_have_account: "Vous avez déjà un compte ? ",
    unknown: "Inconnu",
    none_specified: "Non spécifié",
    general_rest: "Repos général",
    general_wellness: "Bases du Bien-être",
    no_explanation: "Aucune explication détaillée disponible.",
    voice_unsupported: "La saisie vocale n'est pas prise en charge.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_its_own_table() {
        assert_eq!(translations(Language::En).login, "Login");
        assert_eq!(translations(Language::Zh).login, "登录");
        assert_eq!(translations(Language::Fr).login, "Connexion");
    }

    #[test]
    fn tables_serialize_with_camel_case_keys() {
        let value = serde_json::to_value(translations(Language::En)).unwrap();
        assert_eq!(value["startDiagnosis"], "Start Diagnosis");
        assert_eq!(value["noneSpecified"], "None specified");
    }
}
