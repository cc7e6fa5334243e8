//! The closed category set for banking requests.
//!
//! Categories steer the prompts only; the chain accepts the model's
//! selection as-is and never validates it against this list.

/// Every category the assistant can route a request to.
pub const CATEGORIES: [&str; 8] = [
    "Account Opening",
    "Billing Issue",
    "Account Access",
    "Transaction Inquiry",
    "Card Services",
    "Account Statement",
    "Loan Inquiry",
    "General Information",
];

/// Dash-list block interpolated into the category-suggestion prompt.
pub const CATEGORY_BLOCK: &str = "
- Account Opening
- Billing Issue
- Account Access
- Transaction Inquiry
- Card Services
- Account Statement
- Loan Inquiry
- General Information
";
