//! Validation rules
//!
//! Evaluated required -> type-specific -> custom; the first failing rule
//! wins. An empty optional field passes the type-specific checks.

/// Minimum digit/punctuation characters for a phone number after
/// whitespace removal. The two historical variants disagreed (8 vs 10);
/// 10 is canonical.
pub const PHONE_MIN_SIGNIFICANT: usize = 10;

/// A single field rule with its user-facing (French) message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty after trimming
    Required,
    /// local@domain.tld shape
    Email,
    /// Optional +, optional parentheses, enough digit-bearing characters
    Phone,
    /// Bounded integer, e.g. a child age 0-10
    IntRange { min: i64, max: i64 },
}

impl Rule {
    /// Error message if the value violates this rule
    pub fn violation(&self, value: &str) -> Option<String> {
        match self {
            Self::Required => value
                .trim()
                .is_empty()
                .then(|| "Ce champ est requis".to_string()),
            Self::Email => {
                (!is_valid_email(value.trim())).then(|| "Adresse e-mail invalide".to_string())
            }
            Self::Phone => {
                (!is_valid_phone(value)).then(|| "Numéro de téléphone invalide".to_string())
            }
            Self::IntRange { min, max } => match value.trim().parse::<i64>() {
                Ok(n) if (*min..=*max).contains(&n) => None,
                _ => Some(format!("Entrez un nombre entre {min} et {max}")),
            },
        }
    }
}

/// First failing rule's message, in rule order; empty optional values pass
pub fn first_violation(rules: &[Rule], value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return rules
            .iter()
            .find(|r| **r == Rule::Required)
            .and_then(|r| r.violation(value));
    }
    rules.iter().find_map(|r| r.violation(value))
}

fn is_valid_email(s: &str) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn is_valid_phone(s: &str) -> bool {
    let stripped: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let rest = stripped.strip_prefix('+').unwrap_or(&stripped);
    if rest.is_empty() {
        return false;
    }
    let mut significant = 0usize;
    for c in rest.chars() {
        match c {
            '0'..='9' | '(' | ')' | '-' | '.' => significant += 1,
            _ => return false,
        }
    }
    significant >= PHONE_MIN_SIGNIFICANT
}
