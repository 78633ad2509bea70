/// Categories the generator may assign to a transaction description.
/// Anything else, and any upstream failure, degrades to `DEFAULT_CATEGORY`.
pub const ASSISTANT_CATEGORIES: [&str; 10] = [
    "Housing",
    "Food",
    "Transport",
    "Utilities",
    "Entertainment",
    "Health",
    "Shopping",
    "Subscriptions",
    "Travel",
    "Other",
];

pub const DEFAULT_CATEGORY: &str = "Other";
