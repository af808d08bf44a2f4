//! crates/tongue_balance_core/src/legal.rs
//!
//! Terms of Service and Privacy Policy. The documents are only published in English.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LegalSection {
    pub heading: &'static str,
    pub paragraphs: &'static [&'static str],
    pub items: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct LegalDocument {
    pub title: &'static str,
    pub last_updated: &'static str,
    pub sections: &'static [LegalSection],
}

/// Which document an overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalKind {
    TermsOfService,
    PrivacyPolicy,
}

impl LegalKind {
    pub fn document(self) -> &'static LegalDocument {
        match self {
            LegalKind::TermsOfService => terms_of_service(),
            LegalKind::PrivacyPolicy => privacy_policy(),
        }
    }
}

pub const HEALTH_DISCLAIMER: &str = "This application is for educational and wellness purposes only and does not constitute medical advice, diagnosis, or treatment. Always seek the advice of your physician or other qualified health provider with any questions you may have regarding a medical condition.";

pub fn terms_of_service() -> &'static LegalDocument {
    &TERMS
}

pub fn privacy_policy() -> &'static LegalDocument {
    &PRIVACY
}

static TERMS: LegalDocument = LegalDocument {
    title: "Terms of Service",
    last_updated: "January 18, 2026",
    sections: &[
        LegalSection {
            heading: "1. Nature of Service",
            paragraphs: &["TongueBalance AI is an educational wellness tool that utilizes Artificial Intelligence to provide insights based on Traditional Chinese Medicine (TCM) principles. It is not a medical device and does not provide medical diagnoses, treatments, or cures."],
            items: &[],
        },
        LegalSection {
            heading: "2. No Medical Advice",
            paragraphs: &["The information provided is for informational and educational purposes only. You should not use this information to diagnose or treat a health problem. Always seek the advice of a physician or other qualified health provider with any questions you may have regarding a medical condition. If you experience a medical emergency, please contact your local emergency services."],
            items: &[],
        },
        LegalSection {
            heading: "3. User Responsibilities",
            paragraphs: &[],
            items: &[
                "You agree to upload only your own images or images for which you have explicit consent from the subject.",
                "You agree not to use the service for any illegal purposes or to violate the privacy rights of others.",
                "You are responsible for maintaining the confidentiality of your account credentials.",
                "You agree not to reverse-engineer, decompile, or attempt to extract the AI models or underlying technology.",
            ],
        },
        LegalSection {
            heading: "4. Monetization & Purchases",
            paragraphs: &[
                "Purchases of online courses (e.g., Ba Duan Jin Mastery, Yin Nourishing Kitchen) or physical goods (e.g., Wellness Tea Blends) are subject to the refund policies of ChaDynasty Wellness. Access to \"Premium\" features requires a valid user account and may be subject to recurring charges.",
                "All prices are subject to change with notice. Refunds are available within 30 days of purchase if the digital product has not been substantially used.",
            ],
            items: &[],
        },
        LegalSection {
            heading: "5. Limitation of Liability",
            paragraphs: &[
                "To the maximum extent permitted by law, TongueBalance AI and its parent companies (TwoHundredK Technologies / ChaDynasty Wellness) shall not be liable for any indirect, incidental, special, or consequential damages resulting from the use (or inability to use) the service.",
                "This includes but is not limited to: data loss, business interruption, loss of profits, or health-related issues arising from reliance on the AI analysis.",
            ],
            items: &[],
        },
        LegalSection {
            heading: "6. Disclaimer of Warranties",
            paragraphs: &["The service is provided on an \"AS IS\" and \"AS AVAILABLE\" basis. We make no warranties, express or implied, regarding the accuracy, completeness, or reliability of the AI analysis. TCM assessment results should be considered as suggestions only."],
            items: &[],
        },
        LegalSection {
            heading: "7. Changes to Terms",
            paragraphs: &["We reserve the right to modify these terms at any time. Changes will be effective immediately upon posting to the application. Your continued use of the service constitutes acceptance of the updated terms."],
            items: &[],
        },
        LegalSection {
            heading: "8. Contact",
            paragraphs: &["For questions about these Terms of Service, please contact us at support@chadynasty.wellness"],
            items: &[],
        },
        LegalSection {
            heading: "Important Notice",
            paragraphs: &["By using TongueBalance AI, you acknowledge that you have read these Terms of Service, understand them, and agree to be bound by them. If you do not agree to these terms, you should not use this service."],
            items: &[],
        },
    ],
};

static PRIVACY: LegalDocument = LegalDocument {
    title: "Privacy Policy",
    last_updated: "January 18, 2026",
    sections: &[
        LegalSection {
            heading: "1. Data Collection",
            paragraphs: &["We collect the following information when you use TongueBalance AI:"],
            items: &[
                "Images: Photos of tongues uploaded for analysis.",
                "Account Data: Email addresses, usernames, and hashed passwords for users who create an account.",
                "Usage Data: How you interact with the AI analysis, timestamps, and device information.",
                "Biometric Data: Your tongue image is considered biometric data and is treated with strict confidentiality.",
            ],
        },
        LegalSection {
            heading: "2. How We Use Your Data",
            paragraphs: &[],
            items: &[
                "Analysis & Wellness Recommendations: Images are sent to Google's Gemini API for the sole purpose of generating your TCM wellness report and recommendations.",
                "Service Improvement: We may use anonymized and aggregated data to improve our internal AI prompts, wellness logic, and user experience.",
                "Marketing (Opt-In Only): If you explicitly opt-in, we may use your email to send updates about TongueBalance Wellness products, new courses, or wellness tips.",
                "Legal Compliance: We may disclose information when required by law or to protect our rights and safety.",
            ],
        },
        LegalSection {
            heading: "3. Data Storage & Security",
            paragraphs: &["We take the security of your data seriously:"],
            items: &[
                "Images are stored securely only if you choose to save them to your \"History.\"",
                "You may delete your data at any time through your account settings.",
                "We use industry-standard AES-256 encryption for data in transit and at rest.",
                "All stored passwords are hashed using secure algorithms (never stored in plain text).",
                "We conduct regular security audits to ensure data protection compliance.",
            ],
        },
        LegalSection {
            heading: "4. Third-Party Sharing",
            paragraphs: &["Third Parties We Share With:"],
            items: &[
                "Google Gemini API: Image data is sent to Google for AI analysis. Google's privacy policy applies to this processing. Images are not retained by Google after analysis.",
                "Analytics Providers: We may use anonymized usage data with third-party analytics services.",
                "What We Do NOT Do: We do not sell, trade, or share your personal biometric data with third-party advertisers, data brokers, or marketing firms.",
            ],
        },
        LegalSection {
            heading: "5. Your Consent",
            paragraphs: &["By uploading an image to TongueBalance AI, you explicitly consent to the processing of your biometric data (tongue image) for wellness analysis. You may withdraw this consent at any time by deleting your account or specific analyses."],
            items: &[],
        },
        LegalSection {
            heading: "6. Data Retention",
            paragraphs: &["We retain your data only as long as necessary to provide the service:"],
            items: &[
                "Account data is retained while your account is active.",
                "Analysis history is retained as long as you maintain your account.",
                "Upon account deletion, all personal data is permanently removed within 30 days.",
                "Anonymized data may be retained for analytics and service improvement.",
            ],
        },
        LegalSection {
            heading: "7. User Rights",
            paragraphs: &["Depending on your location, you may have the following rights:"],
            items: &[
                "Right to Access: Request a copy of all personal data we hold about you.",
                "Right to Delete: Request deletion of your data (the \"right to be forgotten\").",
                "Right to Rectification: Update or correct inaccurate information.",
                "Right to Opt-Out: Unsubscribe from marketing emails at any time.",
            ],
        },
        LegalSection {
            heading: "8. Cookies & Tracking",
            paragraphs: &["TongueBalance AI uses local browser storage (localStorage) to maintain your session and user preferences. We do not use third-party cookies for tracking purposes. You can clear this data in your browser settings at any time."],
            items: &[],
        },
        LegalSection {
            heading: "9. Changes to Privacy Policy",
            paragraphs: &["We may update this Privacy Policy periodically. We will notify you of significant changes via email or by posting a notice on our application. Your continued use of the service constitutes acceptance of the updated policy."],
            items: &[],
        },
        LegalSection {
            heading: "10. Contact Us",
            paragraphs: &["For questions about this Privacy Policy or to exercise your data rights, please contact:"],
            items: &["Email: privacy@tonguebalance.ai", "Company: TongueBalance Inc."],
        },
        LegalSection {
            heading: "GDPR & Privacy Compliance",
            paragraphs: &["TongueBalance AI complies with GDPR, CCPA, and other major privacy regulations. If you believe your privacy rights have been violated, you may file a complaint with your local data protection authority."],
            items: &[],
        },
    ],
};
