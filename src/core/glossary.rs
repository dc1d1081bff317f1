use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    pub definition: String,
    pub category: String,
}

impl GlossaryTerm {
    pub fn new(term: &str, definition: &str, category: &str) -> Self {
        Self {
            term: term.to_string(),
            definition: definition.to_string(),
            category: category.to_string(),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.term.to_lowercase().contains(needle)
            || self.definition.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

const DEFAULT_TERMS: &[(&str, &str, &str)] = &[
    ("APR", "Annual Percentage Rate - The yearly cost of a loan including interest and fees, expressed as a percentage.", "Loans"),
    ("Asset", "Something of value that you own, such as cash, investments, real estate, or personal property.", "General"),
    ("Budget", "A plan for how you will spend and save your money over a specific period, typically monthly.", "Budgeting"),
    ("Compound Interest", "Interest calculated on both the initial principal and previously earned interest, leading to exponential growth over time.", "Investing"),
    ("Credit Score", "A numerical representation of your creditworthiness, typically ranging from 300 to 850.", "Credit"),
    ("Diversification", "Spreading investments across different asset classes to reduce risk.", "Investing"),
    ("Emergency Fund", "Money set aside to cover unexpected expenses, typically 3-6 months of living expenses.", "Savings"),
    ("ETF", "Exchange-Traded Fund - A type of investment fund that trades on stock exchanges like individual stocks.", "Investing"),
    ("FICO Score", "A specific type of credit score created by the Fair Isaac Corporation, widely used by lenders.", "Credit"),
    ("401(k)", "An employer-sponsored retirement savings plan that allows employees to contribute pre-tax dollars.", "Retirement"),
    ("IRA", "Individual Retirement Account - A tax-advantaged account for retirement savings.", "Retirement"),
    ("Liability", "Money you owe to others, such as loans, credit card debt, or mortgages.", "General"),
    ("Liquidity", "How quickly and easily an asset can be converted to cash without losing value.", "Investing"),
    ("Net Worth", "Your total assets minus your total liabilities - essentially what you own minus what you owe.", "General"),
    ("Principal", "The original amount of money borrowed in a loan or invested, excluding interest.", "Loans"),
    ("ROI", "Return on Investment - A measure of the efficiency of an investment, calculated as gain/loss divided by cost.", "Investing"),
    ("Roth IRA", "A retirement account funded with after-tax dollars, allowing tax-free withdrawals in retirement.", "Retirement"),
    ("Stock", "A share of ownership in a company that can be bought and sold on stock exchanges.", "Investing"),
    ("Bond", "A loan you give to a company or government in exchange for regular interest payments.", "Investing"),
    ("Mortgage", "A loan used to purchase real estate, typically repaid over 15-30 years.", "Loans"),
];

/// Searchable list of financial terms. Callers may inject their own list.
#[derive(Debug, Clone)]
pub struct Glossary {
    terms: Vec<GlossaryTerm>,
}

impl Glossary {
    pub fn new(terms: Vec<GlossaryTerm>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[GlossaryTerm] {
        &self.terms
    }

    /// Case-insensitive substring search over term, definition and category.
    /// An empty query returns every term.
    pub fn search(&self, query: &str) -> Vec<&GlossaryTerm> {
        let needle = query.trim().to_lowercase();
        self.terms
            .iter()
            .filter(|term| needle.is_empty() || term.matches(&needle))
            .collect()
    }

    pub fn lookup(&self, term: &str) -> Option<&GlossaryTerm> {
        let wanted = term.trim().to_lowercase();
        self.terms.iter().find(|t| t.term.to_lowercase() == wanted)
    }
}

impl Default for Glossary {
    fn default() -> Self {
        Self::new(
            DEFAULT_TERMS
                .iter()
                .map(|(term, definition, category)| GlossaryTerm::new(term, definition, category))
                .collect(),
        )
    }
}
