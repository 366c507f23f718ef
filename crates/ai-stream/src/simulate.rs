//! A stand-in for a real inference call: deterministic rewrites of the
//! selected text driven by keywords in the instruction.

static NUMBER_RE: std::sync::LazyLock<Option<regex::Regex>> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"\$?[\d,]+").ok());

static WORD_RE: std::sync::LazyLock<Option<regex::Regex>> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"\w\S*").ok());

/// Selections of at most this many words get the short revision marker.
const SHORT_SELECTION_WORDS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub explanation: String,
}

impl Rewrite {
    fn new(text: String, explanation: &str) -> Self {
        Self {
            text,
            explanation: explanation.to_string(),
        }
    }
}

/// Rewrites `selected` the way the instruction asks.
///
/// Keywords are checked in order: `increase`/`add` (numbers × 1.5),
/// `double`, `reduce`/`decrease` (numbers × 0.75), `uppercase`/`caps`,
/// `lowercase`, `title case`. Any other instruction tags the text as edited;
/// no instruction at all produces a generic revision.
pub fn simulate_rewrite(selected: &str, instruction: Option<&str>) -> Rewrite {
    let Some(instruction) = instruction.map(str::trim).filter(|i| !i.is_empty()) else {
        return revise(selected);
    };

    let lower = instruction.to_lowercase();

    if lower.contains("increase") || lower.contains("add") {
        Rewrite::new(
            scale_numbers(selected, 3, 2),
            "Increased values in selected text by 50%",
        )
    } else if lower.contains("double") {
        Rewrite::new(
            scale_numbers(selected, 2, 1),
            "Doubled all numeric values in selection",
        )
    } else if lower.contains("reduce") || lower.contains("decrease") {
        Rewrite::new(
            scale_numbers(selected, 3, 4),
            "Reduced values in selected text by 25%",
        )
    } else if lower.contains("uppercase") || lower.contains("caps") {
        Rewrite::new(selected.to_uppercase(), "Converted selected text to uppercase")
    } else if lower.contains("lowercase") {
        Rewrite::new(selected.to_lowercase(), "Converted selected text to lowercase")
    } else if lower.contains("title case") {
        Rewrite::new(title_case(selected), "Converted selected text to title case")
    } else {
        Rewrite::new(
            format!("{selected} [Edited by AI]"),
            "Applied requested modification to selected text",
        )
    }
}

fn revise(selected: &str) -> Rewrite {
    let text = if selected.split_whitespace().count() <= SHORT_SELECTION_WORDS {
        format!("[AI revised] {selected}")
    } else {
        format!(
            "{} (enhanced by AI with improved clarity and conciseness)",
            selected.trim()
        )
    };

    Rewrite::new(text, "Revised selected text")
}

/// Multiplies every number by `numerator / denominator`, rounding down.
/// Dollar amounts keep their `$` and get thousands separators.
fn scale_numbers(text: &str, numerator: u128, denominator: u128) -> String {
    let Some(re) = NUMBER_RE.as_ref() else {
        return text.to_string();
    };

    re.replace_all(text, |caps: &regex::Captures<'_>| {
        let matched = &caps[0];
        let digits: String = matched.chars().filter(char::is_ascii_digit).collect();

        // A lone "," or "$," has nothing to scale.
        let Ok(value) = digits.parse::<u128>() else {
            return matched.to_string();
        };

        let scaled = value.saturating_mul(numerator) / denominator;

        if matched.starts_with('$') {
            format!("${}", group_thousands(scaled))
        } else {
            scaled.to_string()
        }
    })
    .into_owned()
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

fn title_case(text: &str) -> String {
    let Some(re) = WORD_RE.as_ref() else {
        return text.to_string();
    };

    re.replace_all(text, |caps: &regex::Captures<'_>| {
        let mut chars = caps[0].chars();

        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.as_str().to_lowercase().chars())
                .collect(),
            None => String::new(),
        }
    })
    .into_owned()
}
