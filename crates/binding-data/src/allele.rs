//! Allele Name Handling

/// Minimum length of a well-formed allele name (gene letter + 4 digits, e.g. `C0401`)
const MIN_ALLELE_NAME_LEN: usize = 5;

/// Separators dropped during normalization
const NAME_SEPARATORS: [&str; 4] = ["HLA-", "-", "*", ":"];

/// Normalize an allele name to its compact form
///
/// `HLA-A*02:01` and `a0201` both become `A0201`. Old serotype names such as
/// `HLA-Cw*04:01` collapse `CW` to `C`.
pub fn normalize_allele_name(name: &str) -> String {
    let mut normalized = name.to_uppercase().replace("CW", "C");
    for separator in NAME_SEPARATORS {
        normalized = normalized.replace(separator, "");
    }
    normalized
}

/// Whether a raw allele name is too short or purely numeric to be trusted
pub fn is_malformed_allele_name(name: &str) -> bool {
    let numeric = !name.is_empty() && name.chars().all(|c| c.is_ascii_digit());
    numeric || name.chars().count() < MIN_ALLELE_NAME_LEN
}
