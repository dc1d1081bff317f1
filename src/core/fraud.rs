//! Keyword-based scam detection for chat messages.
//!
//! A message is flagged when its lowercased text contains any phrase of the
//! keyword set as a plain substring. There is no word-boundary check, so
//! "passwordless" is flagged by "password".

use serde::Serialize;

pub const DEFAULT_FRAUD_KEYWORDS: &[&str] = &[
    // phishing & credentials
    "phishing",
    "scam",
    "password",
    "social security",
    "ssn",
    "bank account number",
    "routing number",
    "credit card number",
    "pin number",
    // payment pressure
    "wire transfer",
    "urgent payment",
    "verify account",
    "suspended account",
    "click this link",
    "download attachment",
    // investment schemes
    "bitcoin",
    "cryptocurrency investment",
    "guaranteed returns",
    "get rich quick",
    "investment opportunity",
    "limited time offer",
    "act now",
    // untraceable transfers
    "send money",
    "western union",
    "gift cards",
    "prepaid cards",
];

/// Ordered, de-duplicated, lowercase phrase list. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FraudKeywordSet {
    keywords: Vec<String>,
}

impl FraudKeywordSet {
    /// Blank phrases are dropped since they would match every message.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<String> = Vec::new();
        for phrase in phrases {
            let phrase = phrase.as_ref().trim().to_lowercase();
            if phrase.is_empty() || keywords.contains(&phrase) {
                continue;
            }
            keywords.push(phrase);
        }
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Default for FraudKeywordSet {
    fn default() -> Self {
        Self::new(DEFAULT_FRAUD_KEYWORDS)
    }
}

/// Returns true when `message` contains any of `keywords`, ignoring case.
pub fn contains_fraud_keyword<S: AsRef<str>>(message: &str, keywords: &[S]) -> bool {
    if message.is_empty() {
        return false;
    }
    let normalized = message.to_lowercase();
    keywords.iter().any(|keyword| {
        let keyword = keyword.as_ref();
        !keyword.is_empty() && normalized.contains(&keyword.to_lowercase())
    })
}

#[derive(Debug, Clone, Default)]
pub struct FraudHeuristicDetector {
    keywords: FraudKeywordSet,
}

impl FraudHeuristicDetector {
    pub fn new(keywords: FraudKeywordSet) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &FraudKeywordSet {
        &self.keywords
    }

    pub fn detect(&self, message: &str) -> bool {
        contains_fraud_keyword(message, self.keywords.keywords())
    }

    /// Every phrase found in `message`, in keyword-set order.
    pub fn matched_keywords(&self, message: &str) -> Vec<&str> {
        if message.is_empty() {
            return Vec::new();
        }
        let normalized = message.to_lowercase();
        self.keywords
            .keywords()
            .iter()
            .filter(|keyword| normalized.contains(keyword.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EmergencyContact {
    pub name: &'static str,
    pub phone: &'static str,
    pub website: &'static str,
}

pub const SECURITY_TIPS: &[&str] = &[
    "Never share personal information like Social Security numbers, bank account details, or passwords with anyone online or over the phone.",
    "Legitimate financial institutions will never ask for sensitive information via email, text, or unsolicited phone calls.",
    "Be suspicious of urgent requests for money transfers, gift cards, or cryptocurrency payments.",
    "Always verify the identity of anyone requesting financial information by calling the official number of the institution directly.",
    "If an investment opportunity sounds too good to be true, it probably is. Research thoroughly before investing.",
    "Never click on suspicious links or download attachments from unknown sources.",
    "Use strong, unique passwords for all financial accounts and enable two-factor authentication when available.",
    "Regularly monitor your bank and credit card statements for unauthorized transactions.",
];

pub const EMERGENCY_CONTACTS: &[EmergencyContact] = &[
    EmergencyContact {
        name: "Federal Trade Commission (FTC)",
        phone: "1-877-FTC-HELP (1-877-382-4357)",
        website: "https://reportfraud.ftc.gov",
    },
    EmergencyContact {
        name: "FBI Internet Crime Complaint Center",
        phone: "N/A (Online Only)",
        website: "https://www.ic3.gov",
    },
    EmergencyContact {
        name: "AARP Fraud Watch Network",
        phone: "1-877-908-3360",
        website: "https://www.aarp.org/money/scams-fraud",
    },
];
