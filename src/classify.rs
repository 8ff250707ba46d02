use regex::Regex;
use std::sync::LazyLock;

static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b(jan(uary)?|feb(ruary)?|mar(ch)?|apr(il)?|may|june?|july?|aug(ust)?
          |sep(t(ember)?)?|oct(ober)?|nov(ember)?|dec(ember)?)\.?\s*'?\d{2,4}\b
        |
        \b(19|20)\d{2}\s*(-|–|—|to)\s*((19|20)\d{2}|present|current|now|till\s+date)\b
        |
        \b\d{1,2}/(19|20)\d{2}\s*(-|–|—|to)\s*(\d{1,2}/(19|20)\d{2}|present|current|now|till\s+date)\b
        ",
    )
    .expect("date range pattern")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\d{1,3}[-\s]?\d{6,12}\b").expect("phone pattern"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern")
});

static LINKEDIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/in/[a-zA-Z0-9-]+").expect("linkedin pattern"));

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year pattern"));

static FOUR_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}").expect("four digit pattern"));

static OVERFLOW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\+\s*\d+\s*more$").expect("overflow pattern"));

// Labels the legacy layout uses for skill groupings; never a name or title.
const SKILL_CATEGORY_WORDS: [&str; 6] = [
    "Languages",
    "Tools",
    "Key Skills",
    "Databases",
    "Platforms",
    "Skills",
];

pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn non_empty(text: &str) -> Option<String> {
    let text = normalize_ws(text);
    if text.is_empty() { None } else { Some(text) }
}

// "Jan 2020 – Dec 2021", "Oct '19", "2018 - present", "01/2020 - 12/2021".
pub fn looks_like_date_range(text: &str) -> bool {
    DATE_RANGE_RE.is_match(text)
}

pub fn looks_like_contact_line(text: &str) -> bool {
    text.contains('@')
        || text.contains('|')
        || PHONE_RE.is_match(text)
        || text.to_lowercase().contains("linkedin")
}

pub fn find_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn find_linkedin(text: &str) -> Option<String> {
    LINKEDIN_RE
        .find(text)
        .map(|m| format!("https://{}", m.as_str()))
}

pub fn find_year(text: &str) -> Option<String> {
    YEAR_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn find_four_digits(text: &str) -> Option<String> {
    FOUR_DIGITS_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn is_overflow_token(text: &str) -> bool {
    OVERFLOW_RE.is_match(text.trim())
}

pub fn is_skill_category(text: &str) -> bool {
    SKILL_CATEGORY_WORDS.iter().any(|word| text.contains(word))
}

pub fn clean_bullet(text: &str) -> String {
    text.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '•' | '▪' | '●' | '◦'))
        .trim()
        .to_string()
}

pub fn is_bullet_text(text: &str) -> bool {
    text.trim_start().starts_with(['•', '▪', '●', '◦'])
}

pub fn strip_label(text: &str, label: &str) -> String {
    let trimmed = text.trim();
    let matches = trimmed
        .get(..label.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(label));
    if !matches {
        return trimmed.to_string();
    }
    trimmed[label.len()..]
        .trim_start_matches(':')
        .trim()
        .to_string()
}

pub fn push_skill(skills: &mut Vec<String>, item: &str) {
    let item = normalize_ws(item);
    if item.is_empty() || is_overflow_token(&item) || skills.contains(&item) {
        return;
    }
    skills.push(item);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_ranges() {
        assert!(looks_like_date_range("Jan 2020 – Dec 2021"));
        assert!(looks_like_date_range("October 2019 to Present"));
        assert!(looks_like_date_range("Sep '18"));
        assert!(looks_like_date_range("2016 - 2020"));
        assert!(looks_like_date_range("2019 to present"));
        assert!(looks_like_date_range("01/2020 - 12/2021"));
        assert!(looks_like_date_range("06/2019 – Present"));
        assert!(looks_like_date_range("6/2019 to till date"));
    }

    #[test]
    fn test_date_ranges_reject_names() {
        assert!(!looks_like_date_range("Acme Corp"));
        assert!(!looks_like_date_range("Senior Engineer"));
        assert!(!looks_like_date_range("Marketing 2020 plan"));
        assert!(!looks_like_date_range("Toronto Systems"));
        assert!(!looks_like_date_range("Mayank Infotech"));
        assert!(!looks_like_date_range("Hewlett-Packard"));
        assert!(!looks_like_date_range("Tata Consultancy Services - Pune"));
    }

    #[test]
    fn test_contact_lines() {
        assert!(looks_like_contact_line("+91-9876543210"));
        assert!(looks_like_contact_line("jane@example.com"));
        assert!(looks_like_contact_line("linkedin.com/in/jane-doe"));
        assert!(looks_like_contact_line("Pune | Remote"));
        assert!(!looks_like_contact_line("Acme Corp"));
    }

    #[test]
    fn test_contact_finders() {
        let line = "+91-9876543210 | jane.doe@example.com | linkedin.com/in/jane-doe";
        assert_eq!(find_phone(line), Some("+91-9876543210".to_string()));
        assert_eq!(find_email(line), Some("jane.doe@example.com".to_string()));
        assert_eq!(
            find_linkedin(line),
            Some("https://linkedin.com/in/jane-doe".to_string())
        );
        assert_eq!(find_phone("no digits here"), None);
    }

    #[test]
    fn test_years() {
        assert_eq!(find_year("B.Tech, 2015"), Some("2015".to_string()));
        assert_eq!(find_year("Room 4021"), None);
        assert_eq!(find_four_digits(" 2015 (Full Time)"), Some("2015".to_string()));
    }

    #[test]
    fn test_overflow_tokens() {
        assert!(is_overflow_token("+5 more"));
        assert!(is_overflow_token(" +12 More "));
        assert!(!is_overflow_token("C++"));
        assert!(!is_overflow_token("more"));
    }

    #[test]
    fn test_push_skill_dedups_and_filters() {
        let mut skills = Vec::new();
        push_skill(&mut skills, "Java");
        push_skill(&mut skills, "  Java ");
        push_skill(&mut skills, "+6 more");
        push_skill(&mut skills, "");
        push_skill(&mut skills, "Spring Boot");
        assert_eq!(skills, vec!["Java", "Spring Boot"]);
    }

    #[test]
    fn test_bullets_and_labels() {
        assert_eq!(clean_bullet("•  Built the thing"), "Built the thing");
        assert!(is_bullet_text(" • item"));
        assert!(!is_bullet_text("item"));
        assert_eq!(strip_label("Skills: Java, SQL,", "Skills"), "Java, SQL,");
        assert_eq!(
            strip_label("project description: A portal", "Project description"),
            "A portal"
        );
        assert_eq!(strip_label("Java", "Skills"), "Java");
    }

    #[test]
    fn test_skill_categories() {
        assert!(is_skill_category("Languages: Java"));
        assert!(is_skill_category("Key Skills"));
        assert!(!is_skill_category("Senior Engineer"));
    }
}
