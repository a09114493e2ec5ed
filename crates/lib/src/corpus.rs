//! # FAQ Knowledge Base
//!
//! The fixed corpus of POSSAP support FAQs. It is loaded once at startup,
//! indexed for semantic retrieval, and never modified at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The service area an FAQ belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Registration,
    TintedGlass,
    CharacterCertificate,
    Verification,
    Payment,
    ApplicationStatus,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Category::Registration => "registration",
            Category::TintedGlass => "tinted_glass",
            Category::CharacterCertificate => "character_certificate",
            Category::Verification => "verification",
            Category::Payment => "payment",
            Category::ApplicationStatus => "application_status",
        };
        write!(f, "{tag}")
    }
}

/// A single question/answer pair from the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    pub category: Category,
}

impl FaqEntry {
    fn new(question: &str, answer: &str, category: Category) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            category,
        }
    }

    /// The text that gets embedded for this entry. Question and answer are
    /// combined so retrieval can match against either side.
    pub fn document_text(&self) -> String {
        format!("Question: {}\nAnswer: {}", self.question, self.answer)
    }
}

/// Returns the full POSSAP FAQ corpus, taken from the revised official FAQ
/// document.
pub fn possap_faqs() -> Vec<FaqEntry> {
    use Category::*;
    vec![
        // Registration and account creation
        FaqEntry::new(
            "I tried to use my NIN/BVN to sign up on the POSSAP portal and got an error saying \"something went wrong, please contact POSSAP admin\"",
            "This means your NIN or BVN record does not have a phone number linked to it. If using NIN, visit the nearest NIMC office to update your record with your current phone number. If using BVN, visit your bank to update your phone number in your BVN details. After updating, contact POSSAP to have your information revalidated in the system.",
            Registration,
        ),
        FaqEntry::new(
            "The name arrangement I see on the POSSAP site is different from what appears on my passport",
            "POSSAP pulls your name directly from NIMC or your bank. Just visit your nearest NIMC office or your bank branch to update how your name appears on your BVN/NIN and contact POSSAP at info@possap.gov.ng for revalidation to proceed with your application.",
            Registration,
        ),
        FaqEntry::new(
            "The phone number or email shown on the POSSAP site is my old one. How can I change it?",
            "POSSAP retrieves information such as your name, phone number etc. directly from the National Identify Management Commission NIMC or Nigeria Inter-bank Settlement System (NIBSS). If your name appears incorrectly, kindly visit the NIMC head office in your state of residence, or the nearest branch of your bank to update the details of your National identification Number (NIN) or your Bank verification Number (BVN) respectively, reach out to POSSAP with your NIN and updated information for revalidation, before continuing your registration.",
            Registration,
        ),
        FaqEntry::new(
            "I'm unable to verify my account even after receiving multiple verification codes",
            "Please contact POSSAP Customer Service with your NIN/BVN, phone number and email address via: Phone: 02018884040 and/or email: info@possap.gov.ng",
            Registration,
        ),
        FaqEntry::new(
            "I did not receive the OTP for account verification. What should I do?",
            "Check your spam or junk folder. If not received, confirm your email address is correct and click Resend OTP.",
            Registration,
        ),
        FaqEntry::new(
            "The system says \"User already exists\" during registration. What should I do?",
            "This means an account is already linked to that identifier or email. Use the Forgot Password option to regain access.",
            Registration,
        ),
        // Tinted glass permit
        FaqEntry::new(
            "I made payment for VVS and was debited, but it didn't reflect on my invoice",
            "Kindly contact POSSAP Customer Care with your invoice number, Vehicle Identification Number (VIN) and Proof of payment for assistance via the following contact information: Phone: 02018884040 and/or email: info@possap.gov.ng",
            TintedGlass,
        ),
        FaqEntry::new(
            "What document should I upload to support my Tinted Glass Permit (health-related) application?",
            "You are required to upload a medical report from a government recognized hospital which is duly signed and stamped by the hospital to support your health claim when submitting your application on the POSSAP portal.",
            TintedGlass,
        ),
        FaqEntry::new(
            "What documents do I need to upload as an applicant for the Tinted Glass Permit opting for the Virtual verification?",
            "Required Documents for uploading include: Proof of ownership of vehicle, Vehicle licensed data page, Supporting document for your reason for application (medical report for health reasons, ID Card for Security reasons, and document proving vehicle is factory fitted with tinted windows for Factory Fitted options).",
            TintedGlass,
        ),
        FaqEntry::new(
            "How long is a Tinted Glass Permit valid?",
            "The Tinted Glass Permit is valid for one year from the date of issuance and must be renewed after expiration.",
            TintedGlass,
        ),
        FaqEntry::new(
            "Who is eligible to apply for the Virtual Vehicle Verification System Tinted Glass Permit on the POSSAP platform?",
            "Only owners of vehicles with a valid 17-digit Vehicle Identification Number (VIN) that conforms to international standards are eligible for the Virtual Vehicle Verification System.",
            TintedGlass,
        ),
        FaqEntry::new(
            "Why am I redirected to another site for Vehicle Verification, what is the Vehicle verification System about?",
            "The Vehicle Verification System (VVS) is an external platform integrated with POSSAP. It serves as a Global Vehicle Identification Number (VIN) database that POSSAP utilizes to securely and in real time retrieve comprehensive vehicle information from the global database, thereby ensuring accurate capture of applicants' vehicle details.",
            TintedGlass,
        ),
        // Police character certificate
        FaqEntry::new(
            "I am applying from the diaspora. What proof should I upload to show I'm not in Nigeria?",
            "You can upload any valid supporting document, such as: Official Diaspora Proof of residence document, Utility bills (water or electricity), Bank statement, Lease agreement or other proof of residence abroad, Drivers license, Work permit.",
            CharacterCertificate,
        ),
        FaqEntry::new(
            "How much does biometric capturing cost for Police Character Certificate & Tinted Glass Permit?",
            "Biometric capturing and physical inspection sessions required for the issuance of Police Character Certificates and Tinted Glass Permits are completely free of charge. Applicants are not required to make any payments for these processes.",
            CharacterCertificate,
        ),
        // Facial verification
        FaqEntry::new(
            "The facial verification process isn't capturing my face after several attempts",
            "Try the following: Use a Computer (Desktop/Laptop) instead of a mobile device, Ensure adequate lighting in the room of capture, Use your most recent passport photo for upload. If the issue persists, contact POSSAP Customer Service: Phone: 02018884040 and/or email: info@possap.gov.ng",
            Verification,
        ),
        FaqEntry::new(
            "Why am I unable to complete the virtual verification, and why do I keep getting an error that says, \"Face does not match\"?",
            "This issue may be due to the use of an outdated passport photograph during your application. Kindly contact the POSSAP Support Team via Phone: 02018884040 or Email: info@possap.gov.ng to request that your uploaded photograph be updated with a more recent one.",
            Verification,
        ),
        // Payments
        FaqEntry::new(
            "Can I make payment for a diaspora application in Naira?",
            "Diaspora payments must be made in dollars (or the corresponding currency of your host country), and for the exact amount displayed on the POSSAP portal.",
            Payment,
        ),
        FaqEntry::new(
            "I erroneously made double payment on the same invoice. How do I get a refund?",
            "Email POSSAP Customer Service at info@possap.gov.ng or call 02018884040, providing the following: Receipt of both payments, Date of payment, Invoice number, Account number paid into, Your Bank details (Account name & Number), Your email address and phone number. Refund processing will follow once verification processes have been concluded.",
            Payment,
        ),
        FaqEntry::new(
            "I made payment on the wrong invoice number. Can I transfer the payment to the correct one?",
            "Payments cannot be transferred between invoices. You may either use the service linked to the paid invoice or make a new payment under the correct invoice.",
            Payment,
        ),
        FaqEntry::new(
            "Can I transfer a payment made under the wrong invoice?",
            "No. Kindly note that Payments are linked to specific invoices and cannot be transferred. You will be required to initiate a new payment for the appropriate service.",
            Payment,
        ),
        FaqEntry::new(
            "I made payment on my generated invoice, but it didn't reflect",
            "Contact POSSAP Customer Service with your payment receipt and invoice number: Phone: 02018884040 and/or email: info@possap.gov.ng. If payment hasn't reflected on POSSAP's end, you will be advised to contact your bank to lodge a complaint.",
            Payment,
        ),
        FaqEntry::new(
            "Why is my payment not reflected after I mistakenly paid in naira instead of 53.76 USD?",
            "Payment for the diaspora can only be in US Dollars. If you have made payment in Naira, kindly send an email to info@possap.gov.ng to get a refund and make payment in the correct currency.",
            Payment,
        ),
        // Application status
        FaqEntry::new(
            "My application has been pending for over 2 weeks now, what do I do to get it approved?",
            "Kindly reach out to the POSSAP support team via Phone: 02018884040 and/or email: info@possap.gov.ng with your invoice number or file number to get clarification and resolution on the issue.",
            ApplicationStatus,
        ),
    ]
}
