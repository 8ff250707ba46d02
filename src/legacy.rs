use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

use crate::classify::{
    clean_bullet, find_email, find_linkedin, find_phone, find_year, is_bullet_text,
    is_skill_category, looks_like_contact_line, looks_like_date_range, push_skill, strip_label,
};
use crate::dom::{carries_class, selector, text_of};
use crate::models::PersonalInfo;
use crate::selectors::LegacySelectors;

const KNOWN_SECTIONS: [&str; 8] = [
    "PROFILE",
    "SUMMARY",
    "EDUCATION",
    "EXPERIENCE",
    "SKILLS",
    "ACHIEVEMENTS",
    "PROJECTS",
    "CERTIFICATIONS",
];

const MIN_BULLET_LEN: usize = 10;
const TECH_LABELS: [&str; 3] = ["Tech Stack", "Technologies", "Skills"];

static CERTIFICATION_RES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s+(?:Certification|Certificate|Certified))")
            .expect("certification pattern"),
        Regex::new(r"(?i)([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s+(?:Professional|Developer|Engineer|Architect))")
            .expect("certified role pattern"),
    ]
});

const CERTIFICATION_KEYWORDS: [&str; 6] = [
    "certification",
    "certified",
    "certificate",
    "accredited",
    "license",
    "diploma",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Profile,
    Education,
    Experience,
    Skills,
    Achievements,
    Projects,
}

impl Section {
    pub fn keyword(self) -> &'static str {
        match self {
            Section::Profile => "PROFILE",
            Section::Education => "EDUCATION",
            Section::Experience => "EXPERIENCE",
            Section::Skills => "SKILLS",
            Section::Achievements => "ACHIEVEMENTS",
            Section::Projects => "PROJECTS",
        }
    }

    fn has_entries(self) -> bool {
        matches!(self, Section::Education | Section::Experience | Section::Projects)
    }

    fn sentinel(self) -> LegacyEntry {
        let text = match self {
            Section::Projects => "No projects found".to_string(),
            other => format!("{} section not found", other.keyword()),
        };
        match self {
            Section::Education => LegacyEntry {
                secondary: Some(text),
                ..Default::default()
            },
            _ => LegacyEntry {
                primary: Some(text),
                ..Default::default()
            },
        }
    }

    fn not_found(self) -> String {
        format!("{} section not found", self.keyword())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Roles {
    pub header: bool,
    pub label: bool,
    pub title: bool,
    pub location: bool,
    pub bullet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub roles: Roles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Outside,
    Inside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Enter,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Primary,
    Secondary,
    Location,
    Duration,
    TechStack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    StartEntry(Field, String),
    Assign(Field, String),
    AppendDescription(String),
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub transition: Option<Transition>,
    pub action: LineAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyEntry {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub tech_stack: Option<String>,
    pub description: Vec<String>,
}

impl LegacyEntry {
    fn has_identity(&self) -> bool {
        self.primary.is_some() || self.secondary.is_some()
    }

    fn get(&self, field: Field) -> Option<&String> {
        match field {
            Field::Primary => self.primary.as_ref(),
            Field::Secondary => self.secondary.as_ref(),
            Field::Location => self.location.as_ref(),
            Field::Duration => self.duration.as_ref(),
            Field::TechStack => self.tech_stack.as_ref(),
        }
    }

    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Primary => &mut self.primary,
            Field::Secondary => &mut self.secondary,
            Field::Location => &mut self.location,
            Field::Duration => &mut self.duration,
            Field::TechStack => &mut self.tech_stack,
        };
        *slot = Some(value);
    }

    pub fn description_text(&self) -> Option<String> {
        let joined = self.description.join(" ");
        if joined.is_empty() { None } else { Some(joined) }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyFields {
    pub personal_info: PersonalInfo,
    pub profile: String,
    pub education: Vec<LegacyEntry>,
    pub experience: Vec<LegacyEntry>,
    pub projects: Vec<LegacyEntry>,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
    pub certifications: Vec<String>,
}

pub fn transition(line: &Line, section: Section, state: ScanState) -> Option<Transition> {
    if !line.roles.header {
        return None;
    }
    let upper = line.text.to_uppercase();
    let own = upper.contains(section.keyword());
    match state {
        ScanState::Outside if own => Some(Transition::Enter),
        ScanState::Inside if !own && KNOWN_SECTIONS.iter().any(|k| upper.contains(k)) => {
            Some(Transition::Exit)
        }
        _ => None,
    }
}

// Decide what `line` means for `section` given the running state and the
// entry being built.
pub fn classify(
    line: &Line,
    section: Section,
    state: ScanState,
    current: &LegacyEntry,
) -> Classification {
    let transition = transition(line, section, state);
    let action = if line.roles.header
        || transition.is_some()
        || state == ScanState::Outside
        || line.text.is_empty()
    {
        LineAction::Skip
    } else if section.has_entries() {
        classify_entry_line(line, section, current)
    } else {
        classify_text_line(line, section)
    };
    Classification { transition, action }
}

fn is_primary_candidate(text: &str) -> bool {
    !looks_like_contact_line(text) && !looks_like_date_range(text) && text.chars().count() > 3
}

fn is_date_line(text: &str, section: Section) -> bool {
    looks_like_date_range(text)
        || (section == Section::Education
            && text.chars().count() <= 12
            && find_year(text).is_some())
}

fn fill_or_append(current: &LegacyEntry, field: Field, text: &str) -> LineAction {
    if current.get(field).is_none() {
        LineAction::Assign(field, text.to_string())
    } else {
        LineAction::AppendDescription(text.to_string())
    }
}

fn classify_entry_line(line: &Line, section: Section, current: &LegacyEntry) -> LineAction {
    let text = line.text.as_str();
    let roles = line.roles;

    if roles.label {
        if is_date_line(text, section) {
            return fill_or_append(current, Field::Duration, text);
        }
        if is_primary_candidate(text) {
            return if current.primary.is_some() {
                LineAction::StartEntry(Field::Primary, text.to_string())
            } else {
                LineAction::Assign(Field::Primary, text.to_string())
            };
        }
        return if text.chars().count() > 3 {
            LineAction::AppendDescription(text.to_string())
        } else {
            LineAction::Skip
        };
    }

    if roles.title && !is_skill_category(text) {
        if current.secondary.is_none() {
            return LineAction::Assign(Field::Secondary, text.to_string());
        }
        // A second degree under an institution starts a new education entry.
        if section == Section::Education && current.primary.is_some() {
            return LineAction::StartEntry(Field::Secondary, text.to_string());
        }
        return LineAction::AppendDescription(text.to_string());
    }

    if roles.location {
        return fill_or_append(current, Field::Location, text);
    }

    if roles.bullet || is_bullet_text(text) {
        let cleaned = clean_bullet(text);
        return if cleaned.chars().count() > MIN_BULLET_LEN {
            LineAction::AppendDescription(cleaned)
        } else {
            LineAction::Skip
        };
    }

    if section == Section::Projects && current.tech_stack.is_none() {
        if let Some(label) = TECH_LABELS
            .iter()
            .find(|label| text.to_lowercase().starts_with(&label.to_lowercase()))
        {
            let stack = strip_label(text, label).trim_end_matches(',').trim().to_string();
            return LineAction::Assign(Field::TechStack, stack);
        }
    }

    if current.duration.is_none() && is_date_line(text, section) {
        return LineAction::Assign(Field::Duration, text.to_string());
    }

    if text.chars().count() > 3 {
        LineAction::AppendDescription(text.to_string())
    } else {
        LineAction::Skip
    }
}

fn classify_text_line(line: &Line, section: Section) -> LineAction {
    let text = line.text.as_str();
    match section {
        Section::Achievements => {
            if line.roles.bullet || is_bullet_text(text) {
                let cleaned = clean_bullet(text);
                if cleaned.chars().count() > MIN_BULLET_LEN {
                    return LineAction::AppendDescription(cleaned);
                }
                LineAction::Skip
            } else if text.chars().count() > 5 {
                LineAction::AppendDescription(text.to_string())
            } else {
                LineAction::Skip
            }
        }
        _ => LineAction::AppendDescription(text.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CollectedLine {
    text: String,
    // Entry whose identifying field this line became.
    owner: Option<usize>,
}

#[derive(Debug, Default)]
struct Accumulator {
    current: LegacyEntry,
    current_lines: Vec<usize>,
    entries: Vec<LegacyEntry>,
    lines: Vec<CollectedLine>,
}

impl Accumulator {
    fn collect(&mut self, text: &str) -> usize {
        self.lines.push(CollectedLine {
            text: text.to_string(),
            owner: None,
        });
        self.lines.len() - 1
    }

    fn assign(&mut self, field: Field, value: String, position: usize) {
        self.current.set(field, value);
        self.lines[position].owner = Some(self.entries.len());
        self.current_lines.push(position);
    }

    fn flush(&mut self) {
        let entry = std::mem::take(&mut self.current);
        let owned = std::mem::take(&mut self.current_lines);
        if entry.has_identity() {
            self.entries.push(entry);
        } else {
            for position in owned {
                self.lines[position].owner = None;
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct SectionScan {
    pub entered: bool,
    pub entries: Vec<LegacyEntry>,
    pub content: Vec<String>,
    collected: Vec<CollectedLine>,
}

impl SectionScan {
    pub fn collected_texts(&self) -> impl Iterator<Item = &str> {
        self.collected.iter().map(|l| l.text.as_str())
    }
}

pub fn scan(lines: &[Line], section: Section) -> SectionScan {
    let mut state = ScanState::Outside;
    let mut entered = false;
    let mut acc = Accumulator::default();
    let mut content = Vec::new();

    for line in lines {
        let step = classify(line, section, state, &acc.current);
        match step.transition {
            Some(Transition::Enter) => {
                tracing::debug!(section = section.keyword(), "entering section");
                state = ScanState::Inside;
                entered = true;
                continue;
            }
            Some(Transition::Exit) => {
                tracing::debug!(section = section.keyword(), next = %line.text, "leaving section");
                acc.flush();
                state = ScanState::Outside;
                continue;
            }
            None => {}
        }
        if state == ScanState::Outside || line.roles.header || line.text.is_empty() {
            continue;
        }

        let position = acc.collect(&line.text);
        match step.action {
            LineAction::StartEntry(field, value) => {
                acc.flush();
                acc.assign(field, value, position);
            }
            LineAction::Assign(field, value) => acc.assign(field, value, position),
            LineAction::AppendDescription(text) if section.has_entries() => {
                acc.current.description.push(text);
            }
            LineAction::AppendDescription(text) => content.push(text),
            LineAction::Skip => {}
        }
    }
    acc.flush();

    SectionScan {
        entered,
        entries: acc.entries,
        content,
        collected: acc.lines,
    }
}

fn positional_entry(texts: &[&str], section: Section) -> LegacyEntry {
    let mut entry = LegacyEntry::default();
    for (index, text) in texts.iter().enumerate() {
        let len = text.chars().count();
        if index == 0 && len > 3 {
            entry.primary = Some(text.to_string());
        } else if index == 1 && len > 3 {
            entry.secondary = Some(text.to_string());
        } else if is_date_line(text, section) {
            entry.duration = Some(text.to_string());
        } else if len > 5 {
            entry.description.push(text.to_string());
        }
    }
    entry
}

// Give entries with no description the unclaimed lines that follow their
// identifying lines, stopping at the next line another entry claimed.
fn repair_descriptions(entries: &mut [LegacyEntry], collected: &[CollectedLine]) {
    for (index, entry) in entries.iter_mut().enumerate() {
        if !entry.description.is_empty() {
            continue;
        }
        let Some(last) = collected.iter().rposition(|l| l.owner == Some(index)) else {
            continue;
        };
        let mut extra = Vec::new();
        for line in &collected[last + 1..] {
            match line.owner {
                Some(owner) if owner != index => break,
                Some(_) => continue,
                None if line.text.chars().count() > 3 => extra.push(line.text.clone()),
                None => {}
            }
        }
        if !extra.is_empty() {
            tracing::debug!(entry = index, lines = extra.len(), "repaired empty description");
            entry.description = extra;
        }
    }
}

pub fn entry_section(lines: &[Line], section: Section) -> Vec<LegacyEntry> {
    let scan = scan(lines, section);
    let mut entries = scan.entries;

    if entries.is_empty() {
        let texts: Vec<&str> = scan.collected.iter().map(|l| l.text.as_str()).collect();
        if !texts.is_empty() {
            tracing::debug!(section = section.keyword(), "no structured entries, reading by position");
            let entry = positional_entry(&texts, section);
            if entry.has_identity() {
                entries.push(entry);
            }
        }
    } else if section != Section::Education {
        repair_descriptions(&mut entries, &scan.collected);
    }

    if entries.is_empty() {
        tracing::debug!(section = section.keyword(), entered = scan.entered, "no entries found");
        entries.push(section.sentinel());
    }
    entries
}

pub fn profile_section(lines: &[Line]) -> String {
    let scan = scan(lines, Section::Profile);
    let text = scan.content.join(" ");
    if !scan.entered || text.is_empty() {
        Section::Profile.not_found()
    } else {
        text
    }
}

pub fn skills_section(lines: &[Line]) -> Vec<String> {
    let scan = scan(lines, Section::Skills);
    let mut skills = Vec::new();
    for text in &scan.content {
        let items = match text.split_once(':') {
            Some((_, rest)) => rest,
            None => text.as_str(),
        };
        for item in items.split([',', ';', '|']) {
            let item = item.trim();
            if item.chars().count() > 1 && !is_skill_category(item) {
                push_skill(&mut skills, item);
            }
        }
    }
    if skills.is_empty() {
        skills.push(Section::Skills.not_found());
    }
    skills
}

pub fn achievements_section(lines: &[Line]) -> Vec<String> {
    let scan = scan(lines, Section::Achievements);
    let mut achievements = scan.content.clone();
    if achievements.is_empty() {
        achievements = scan
            .collected_texts()
            .filter(|t| t.chars().count() > 5)
            .map(str::to_string)
            .collect();
    }
    if achievements.is_empty() {
        achievements.push(Section::Achievements.not_found());
    }
    achievements
}

pub fn certifications(lines: &[Line]) -> Vec<String> {
    let mut found = Vec::new();
    for line in lines {
        let len = line.text.chars().count();
        if !(20..500).contains(&len) {
            continue;
        }
        let lower = line.text.to_lowercase();
        if !CERTIFICATION_KEYWORDS.iter().any(|k| lower.contains(k)) {
            continue;
        }
        for re in CERTIFICATION_RES.iter() {
            if let Some(cap) = re.captures(&line.text).and_then(|c| c.get(1)) {
                let cert = cap.as_str().to_string();
                if !found.contains(&cert) {
                    found.push(cert);
                }
            }
        }
    }
    found
}

pub fn read_lines(doc: &Html, classes: &LegacySelectors) -> Vec<Line> {
    let Some(sel) = selector(&format!(".{}", classes.line)) else {
        return Vec::new();
    };
    doc.select(&sel)
        .map(|el| Line {
            text: text_of(el),
            roles: Roles {
                header: carries_class(el, &classes.header),
                label: carries_class(el, &classes.label),
                title: carries_class(el, &classes.title),
                location: carries_class(el, &classes.location),
                bullet: carries_class(el, &classes.bullet),
            },
        })
        .collect()
}

pub fn personal_info(doc: &Html, classes: &LegacySelectors) -> PersonalInfo {
    let mut info = PersonalInfo::default();
    let first_of = |class: &str| {
        selector(&format!(".{}", class))
            .and_then(|sel| doc.select(&sel).next().map(text_of))
    };

    if let (Some(first), Some(last)) = (first_of(&classes.first_name), first_of(&classes.last_name)) {
        let name = crate::classify::normalize_ws(&format!("{} {}", first, last));
        if !name.is_empty() {
            info.name = Some(name);
        }
    }

    let contact_css = classes
        .contact
        .iter()
        .map(|c| format!(".{}", c))
        .collect::<Vec<_>>()
        .join(", ");
    if let Some(sel) = selector(&contact_css) {
        for el in doc.select(&sel) {
            let text = text_of(el);
            if info.phone.is_none() {
                info.phone = find_phone(&text);
            }
            if info.email.is_none() {
                info.email = find_email(&text);
            }
            if info.linked_in.is_none() {
                info.linked_in = find_linkedin(&text);
            }
        }
    }

    if let Some(sel) = selector(&format!(".{}", classes.location)) {
        info.location = doc.select(&sel).map(text_of).find(|t| t.contains(','));
    }

    info
}

pub fn extract(doc: &Html, classes: &LegacySelectors) -> LegacyFields {
    let lines = read_lines(doc, classes);
    tracing::debug!(lines = lines.len(), "legacy lines read");

    LegacyFields {
        personal_info: personal_info(doc, classes),
        profile: profile_section(&lines),
        education: entry_section(&lines, Section::Education),
        experience: entry_section(&lines, Section::Experience),
        projects: entry_section(&lines, Section::Projects),
        skills: skills_section(&lines),
        achievements: achievements_section(&lines),
        certifications: certifications(&lines),
    }
}
