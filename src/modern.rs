use scraper::{ElementRef, Html};

use crate::classify::{
    find_email, find_four_digits, find_linkedin, find_phone, non_empty, push_skill, strip_label,
};
use crate::dom::{
    first_element, first_text, has_class, inside_class, own_text, select_all, selector, tag_text,
    text_of,
};
use crate::models::{
    CareerGap, Certification, DesiredJobDetails, Education, ItSkill, Language, PersonalDetails,
    PersonalInfo, ProfileHeader, WorkSummary,
};
use crate::selectors::ModernSelectors;

const NOT_AVAILABLE: &str = "N/A";
const EMPTY_CELL: &str = "- -";
const IT_SKILL_COLUMNS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModernCard {
    pub designation: Option<String>,
    pub dates: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModernExperience {
    Card(ModernCard),
    Gap(CareerGap),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModernProject {
    pub title: String,
    pub duration: Option<String>,
    pub role: Option<String>,
    pub skills: Option<String>,
    pub role_description: Option<String>,
    pub project_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModernFields {
    pub personal_info: PersonalInfo,
    pub header: ProfileHeader,
    pub headline: Option<String>,
    pub work_summary: WorkSummary,
    pub key_skills: Vec<String>,
    pub may_also_know: Vec<String>,
    pub experience: Vec<ModernExperience>,
    pub projects: Vec<ModernProject>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub it_skills: Vec<ItSkill>,
    pub languages: Vec<Language>,
    pub personal_details: PersonalDetails,
    pub desired_job: DesiredJobDetails,
    pub work_authorization: Option<String>,
}

pub fn extract(doc: &Html, sel: &ModernSelectors) -> ModernFields {
    let root = doc.root_element();
    let fields = ModernFields {
        personal_info: personal_info(root, sel),
        header: profile_header(root, sel),
        headline: first_text(root, &sel.headline),
        work_summary: work_summary(root, sel),
        key_skills: key_skills(root, sel),
        may_also_know: skill_tags(root, &sel.may_also_know),
        experience: experience(root, sel),
        projects: projects(root, sel),
        education: education(root, sel),
        certifications: certifications(root, sel),
        it_skills: it_skills(root, sel),
        languages: languages(root, sel),
        personal_details: personal_details(root, sel),
        desired_job: desired_job(root, sel),
        work_authorization: work_authorization(root, sel),
    };
    tracing::debug!(
        experience = fields.experience.len(),
        education = fields.education.len(),
        key_skills = fields.key_skills.len(),
        "modern fields extracted"
    );
    fields
}

pub fn personal_info(root: ElementRef, sel: &ModernSelectors) -> PersonalInfo {
    let mut info = PersonalInfo {
        name: first_text(root, &sel.name),
        email: first_text(root, &sel.email).and_then(|t| find_email(&t).or(Some(t))),
        location: first_text(root, &sel.location),
        ..Default::default()
    };

    for css in &sel.contact_lines {
        let Some(s) = selector(css) else { continue };
        for el in root.select(&s) {
            let text = text_of(el);
            if info.phone.is_none() {
                info.phone = find_phone(&text);
            }
            if info.linked_in.is_none() {
                info.linked_in = find_linkedin(&text);
            }
            if info.email.is_none() {
                info.email = find_email(&text);
            }
        }
    }
    info
}

pub fn profile_header(root: ElementRef, sel: &ModernSelectors) -> ProfileHeader {
    ProfileHeader {
        total_experience: first_text(root, &sel.total_experience),
        salary: first_text(root, &sel.salary),
        current_position: first_text(root, &sel.current_position),
        highest_degree: first_text(root, &sel.highest_degree),
    }
}

pub fn skill_tags(root: ElementRef, candidates: &[String]) -> Vec<String> {
    let mut skills = Vec::new();
    for el in select_all(root, candidates) {
        if let Some(text) = tag_text(el) {
            push_skill(&mut skills, &text);
        }
    }
    skills
}

// The may-also-know tags are nested in the key skills block, so broad
// candidates would pick them up too.
pub fn key_skills(root: ElementRef, sel: &ModernSelectors) -> Vec<String> {
    for css in &sel.key_skills {
        let Some(s) = selector(css) else { continue };
        let mut skills = Vec::new();
        for el in root
            .select(&s)
            .filter(|el| !inside_class(*el, &sel.may_also_know_group))
        {
            if let Some(text) = tag_text(el) {
                push_skill(&mut skills, &text);
            }
        }
        if !skills.is_empty() {
            return skills;
        }
    }
    Vec::new()
}

pub fn work_summary(root: ElementRef, sel: &ModernSelectors) -> WorkSummary {
    let mut summary = WorkSummary {
        summary: first_text(root, &sel.work_summary),
        ..Default::default()
    };

    let label_sel = selector(&sel.work_detail_label);
    let value_sel = selector(&sel.work_detail_value);
    let rows: Vec<(Option<String>, Option<String>)> = select_all(root, &sel.work_detail_rows)
        .into_iter()
        .map(|row| {
            let label = label_sel
                .as_ref()
                .and_then(|s| row.select(s).next())
                .map(|el| text_of(el).to_lowercase());
            let value = value_sel
                .as_ref()
                .and_then(|s| row.select(s).next())
                .and_then(|el| non_empty(&text_of(el)));
            (label, value)
        })
        .collect();

    let by_label = |key: &str| {
        rows.iter()
            .find(|(label, _)| label.as_deref().is_some_and(|l| l.contains(key)))
            .and_then(|(_, value)| value.clone())
    };
    let by_position = |index: usize| rows.get(index).and_then(|(_, value)| value.clone());

    summary.industry = by_label("industry").or_else(|| by_position(0));
    summary.department = by_label("department").or_else(|| by_position(1));
    summary.role = by_label("role").or_else(|| by_position(2));
    summary
}

pub fn experience(root: ElementRef, sel: &ModernSelectors) -> Vec<ModernExperience> {
    let card_sel = selector(&sel.experience_card);
    let gap_sel = selector(&sel.gap_container);

    let mut items = Vec::new();
    for el in select_all(root, &sel.experience_items) {
        if gap_sel.as_ref().is_some_and(|s| s.matches(&el)) {
            let gap = CareerGap {
                duration: first_text(el, &sel.gap_duration),
                period: first_text(el, &sel.gap_period),
            };
            if gap.duration.is_some() || gap.period.is_some() {
                items.push(ModernExperience::Gap(gap));
            }
        } else if card_sel.as_ref().is_some_and(|s| s.matches(&el)) {
            let card = ModernCard {
                designation: first_text(el, &sel.designation),
                dates: first_text(el, &sel.dates),
                description: first_text(el, &sel.description),
            };
            if card != ModernCard::default() {
                items.push(ModernExperience::Card(card));
            }
        }
    }
    items
}

pub fn projects(root: ElementRef, sel: &ModernSelectors) -> Vec<ModernProject> {
    let text_sel = selector(&sel.project_text);
    let mut projects = Vec::new();

    for card in select_all(root, &sel.project_cards) {
        let Some(title) = first_text(card, &sel.project_name) else {
            continue;
        };
        let role = text_sel.as_ref().and_then(|s| {
            card.select(s)
                .filter(|el| !inside_class(*el, &sel.project_head) && !has_class(*el, "skills"))
                .find_map(|el| non_empty(&text_of(el)))
        });
        let skills = first_text(card, &sel.project_skills)
            .map(|t| strip_label(&t, "Skills").trim_end_matches(',').trim().to_string())
            .and_then(|t| non_empty(&t));
        let role_description = first_text(card, &sel.project_role_description)
            .and_then(|t| non_empty(&strip_label(&t, "Role description")));
        let project_description = first_text(card, &sel.project_description)
            .and_then(|t| non_empty(&strip_label(&t, "Project description")));

        projects.push(ModernProject {
            title,
            duration: first_text(card, &sel.project_duration),
            role,
            skills,
            role_description,
            project_description,
        });
    }
    projects
}

// "Degree, Specialization, Year" split on commas. The year is the first
// four-digit run of the third segment only.
pub fn parse_degree_line(line: &str) -> (String, Option<String>, Option<String>) {
    let parts: Vec<&str> = line.split(',').collect();
    let degree = parts.first().map(|p| p.trim().to_string()).unwrap_or_default();
    let specialization = parts.get(1).and_then(|p| non_empty(p));
    let year = parts.get(2).and_then(|p| find_four_digits(p));
    (degree, specialization, year)
}

pub fn education(root: ElementRef, sel: &ModernSelectors) -> Vec<Education> {
    let mut entries = Vec::new();
    for wrapper in select_all(root, &sel.education_entries) {
        let Some(line_el) = first_element(wrapper, &sel.degree_line) else {
            continue;
        };
        let mut line = own_text(line_el);
        if line.is_empty() {
            line = text_of(line_el);
        }
        let (degree, specialization, year) = parse_degree_line(&line);
        if degree.is_empty() {
            continue;
        }
        entries.push(Education {
            degree,
            specialization,
            year,
            kind: first_text(wrapper, &sel.education_type),
            institution: first_text(wrapper, &sel.institution),
        });
    }
    entries
}

pub fn certifications(root: ElementRef, sel: &ModernSelectors) -> Vec<Certification> {
    select_all(root, &sel.certification_entries)
        .into_iter()
        .filter_map(|entry| {
            Some(Certification {
                course: first_text(entry, &sel.certification_course)?,
                vendor: first_text(entry, &sel.certification_vendor),
            })
        })
        .collect()
}

fn cell_value(text: Option<String>) -> String {
    match text {
        Some(t) if t != EMPTY_CELL => t,
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn it_skills(root: ElementRef, sel: &ModernSelectors) -> Vec<ItSkill> {
    let fallback_sel = selector(&sel.it_skill_fallback_cell);
    let mut skills = Vec::new();

    for row in select_all(root, &sel.it_skill_rows) {
        let fallback: Vec<String> = fallback_sel
            .as_ref()
            .map(|s| row.select(s).map(text_of).collect())
            .unwrap_or_default();
        let cells: Vec<Option<String>> = (0..IT_SKILL_COLUMNS)
            .map(|n| {
                let candidates: Vec<String> = sel
                    .it_skill_cell
                    .iter()
                    .map(|css| css.replace("{n}", &n.to_string()))
                    .collect();
                first_text(row, &candidates).or_else(|| fallback.get(n).and_then(|t| non_empty(t)))
            })
            .collect();

        let [skill, version, last_used, experience] = <[Option<String>; IT_SKILL_COLUMNS]>::try_from(cells)
            .unwrap_or_default();
        // The header row repeats the column title in the skill cell.
        let Some(skill) = skill.filter(|s| s != EMPTY_CELL && !s.eq_ignore_ascii_case("skills"))
        else {
            continue;
        };
        skills.push(ItSkill {
            skill,
            version: cell_value(version),
            last_used: cell_value(last_used),
            experience: cell_value(experience),
        });
    }
    skills
}

pub fn parse_language(text: &str) -> Option<Language> {
    let (head, details) = match text.split_once('(') {
        Some((head, details)) => (head, Some(details)),
        None => (text, None),
    };
    let (name, proficiency) = match head.split_once(" - ") {
        Some((name, level)) => (name, non_empty(level)),
        None => (head, None),
    };
    let language = non_empty(name)?;
    let skills: Vec<String> = details
        .map(|d| {
            d.replace(')', "")
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Some(Language {
        language,
        proficiency,
        skills,
    })
}

pub fn languages(root: ElementRef, sel: &ModernSelectors) -> Vec<Language> {
    select_all(root, &sel.languages)
        .into_iter()
        .filter_map(|el| parse_language(&text_of(el)))
        .collect()
}

fn first_row_cells(root: ElementRef, rows: &[String], cell: &str) -> Vec<Option<String>> {
    let Some(cell_sel) = selector(cell) else {
        return Vec::new();
    };
    first_element(root, rows)
        .map(|row| row.select(&cell_sel).map(|el| non_empty(&text_of(el))).collect())
        .unwrap_or_default()
}

pub fn personal_details(root: ElementRef, sel: &ModernSelectors) -> PersonalDetails {
    let cells = first_row_cells(root, &sel.personal_details_row, &sel.table_cell);
    let at = |i: usize| cells.get(i).cloned().flatten();
    PersonalDetails {
        date_of_birth: at(0),
        gender: at(1),
        marital_status: at(2),
        category: at(3),
        physically_challenged: at(4),
    }
}

pub fn desired_job(root: ElementRef, sel: &ModernSelectors) -> DesiredJobDetails {
    let cells = first_row_cells(root, &sel.desired_job_row, &sel.table_cell);
    let at = |i: usize| cells.get(i).cloned().flatten();
    DesiredJobDetails {
        job_type: at(0),
        employment_status: at(1),
    }
}

pub fn work_authorization(root: ElementRef, sel: &ModernSelectors) -> Option<String> {
    let cells = first_row_cells(root, &sel.work_authorization_row, &sel.table_cell);
    let values: Vec<String> = cells.into_iter().flatten().collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::MODERN_PAGE;

    fn page() -> Html {
        Html::parse_document(MODERN_PAGE)
    }

    #[test]
    fn test_personal_info_and_header() {
        let doc = page();
        let sel = ModernSelectors::default();
        let info = personal_info(doc.root_element(), &sel);
        assert_eq!(info.name.as_deref(), Some("Priya Sharma"));
        assert_eq!(info.email.as_deref(), Some("priya.sharma@example.com"));
        assert_eq!(info.phone.as_deref(), Some("+91-9876543210"));
        assert_eq!(info.linked_in.as_deref(), Some("https://linkedin.com/in/priya-sharma"));
        assert_eq!(info.location.as_deref(), Some("Pune, Maharashtra"));

        let header = profile_header(doc.root_element(), &sel);
        assert_eq!(header.total_experience.as_deref(), Some("6y 2m"));
        assert_eq!(header.salary.as_deref(), Some("12.5 Lacs"));
        assert_eq!(
            header.current_position.as_deref(),
            Some("Senior Software Engineer at Acme Corp")
        );
        assert_eq!(header.highest_degree.as_deref(), Some("B.Tech/B.E."));
    }

    #[test]
    fn test_skill_tags_drop_overflow_and_duplicates() {
        let doc = page();
        let sel = ModernSelectors::default();
        assert_eq!(key_skills(doc.root_element(), &sel), vec!["Java", "Spring Boot"]);
        assert_eq!(skill_tags(doc.root_element(), &sel.may_also_know), vec!["Kafka"]);
    }

    #[test]
    fn test_key_skills_skip_nested_may_also_know() {
        let doc = Html::parse_document(
            r#"<div class="Mqi95">Key skills</div>
               <div class="_8QjY0">
                 <div class="focusable suggestor-tag"><span class="txt ellipsis" title="Go">Go</span></div>
                 <div class="ZVSp3">
                   <div class="focusable suggestor-tag"><span class="txt ellipsis" title="Rust">Rust</span></div>
                 </div>
               </div>"#,
        );
        let sel = ModernSelectors::default();
        assert_eq!(key_skills(doc.root_element(), &sel), vec!["Go"]);
        assert_eq!(skill_tags(doc.root_element(), &sel.may_also_know), vec!["Rust"]);
    }

    #[test]
    fn test_work_summary_by_label() {
        let doc = page();
        let summary = work_summary(doc.root_element(), &ModernSelectors::default());
        assert_eq!(summary.summary.as_deref(), Some("Built payment systems for retail banks."));
        assert_eq!(summary.industry.as_deref(), Some("IT Services"));
        assert_eq!(summary.department.as_deref(), Some("Engineering"));
        assert_eq!(summary.role.as_deref(), Some("Backend Developer"));
    }

    #[test]
    fn test_work_summary_by_position_without_labels() {
        let doc = Html::parse_document(
            r#"<div class="s81Wd">
                 <div class="OMOoI"><span class="cMaXa">Banking</span></div>
                 <div class="OMOoI"><span class="cMaXa">Risk</span></div>
               </div>"#,
        );
        let summary = work_summary(doc.root_element(), &ModernSelectors::default());
        assert_eq!(summary.industry.as_deref(), Some("Banking"));
        assert_eq!(summary.department.as_deref(), Some("Risk"));
        assert_eq!(summary.role, None);
    }

    #[test]
    fn test_experience_keeps_gap_order() {
        let doc = page();
        let items = experience(doc.root_element(), &ModernSelectors::default());
        assert_eq!(items.len(), 3);
        assert!(matches!(&items[0], ModernExperience::Card(c)
            if c.designation.as_deref() == Some("Senior Software Engineer at Acme Corp")
            && c.dates.as_deref() == Some("Jan 2020 - Present")
            && c.description.as_deref() == Some("Leads the payments team.")));
        assert_eq!(
            items[1],
            ModernExperience::Gap(CareerGap {
                duration: Some("6 months".to_string()),
                period: Some("Jul 2019 - Dec 2019".to_string()),
            })
        );
        assert!(matches!(&items[2], ModernExperience::Card(c) if c.description.is_none()));
    }

    #[test]
    fn test_projects() {
        let doc = page();
        let projects = projects(doc.root_element(), &ModernSelectors::default());
        assert_eq!(
            projects,
            vec![ModernProject {
                title: "Payments Gateway".to_string(),
                duration: Some("Mar 2021 - Dec 2021".to_string()),
                role: Some("Tech Lead".to_string()),
                skills: Some("Java, Kafka".to_string()),
                role_description: Some("Owned the routing layer".to_string()),
                project_description: Some("UPI payment routing".to_string()),
            }]
        );
    }

    #[test]
    fn test_parse_degree_line() {
        assert_eq!(
            parse_degree_line("B.Tech/B.E., Computers, 2015"),
            (
                "B.Tech/B.E.".to_string(),
                Some("Computers".to_string()),
                Some("2015".to_string())
            )
        );
        // A four-digit run in the specialization is not a year.
        assert_eq!(parse_degree_line("MBA, Class of 2020").2, None);
        assert_eq!(parse_degree_line("12th"), ("12th".to_string(), None, None));
    }

    #[test]
    fn test_education() {
        let doc = page();
        let entries = education(doc.root_element(), &ModernSelectors::default());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].degree, "B.Tech/B.E.");
        assert_eq!(entries[0].specialization.as_deref(), Some("Computers"));
        assert_eq!(entries[0].year.as_deref(), Some("2015"));
        assert_eq!(entries[0].kind.as_deref(), Some("Full Time"));
        assert_eq!(entries[0].institution.as_deref(), Some("Pune University"));
        assert_eq!(entries[1].degree, "12th");
        assert_eq!(entries[1].institution.as_deref(), Some("CBSE"));
    }

    #[test]
    fn test_it_skills_placeholders_become_na() {
        let doc = page();
        let skills = it_skills(doc.root_element(), &ModernSelectors::default());
        assert_eq!(
            skills,
            vec![
                ItSkill {
                    skill: "Java".to_string(),
                    version: "N/A".to_string(),
                    last_used: "2024".to_string(),
                    experience: "6 Years".to_string(),
                },
                ItSkill {
                    skill: "SQL".to_string(),
                    version: "11".to_string(),
                    last_used: "N/A".to_string(),
                    experience: "N/A".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(
            parse_language("English - Proficient (Read, Write, Speak)"),
            Some(Language {
                language: "English".to_string(),
                proficiency: Some("Proficient".to_string()),
                skills: vec!["Read".to_string(), "Write".to_string(), "Speak".to_string()],
            })
        );
        assert_eq!(
            parse_language("Hindi"),
            Some(Language {
                language: "Hindi".to_string(),
                proficiency: None,
                skills: vec![],
            })
        );
        assert_eq!(parse_language(" (Read)"), None);
    }

    #[test]
    fn test_detail_tables() {
        let doc = page();
        let sel = ModernSelectors::default();
        let details = personal_details(doc.root_element(), &sel);
        assert_eq!(details.date_of_birth.as_deref(), Some("12 Mar 1993"));
        assert_eq!(details.physically_challenged.as_deref(), Some("No"));

        let desired = desired_job(doc.root_element(), &sel);
        assert_eq!(desired.job_type.as_deref(), Some("Permanent"));
        assert_eq!(desired.employment_status.as_deref(), Some("Full Time"));

        assert_eq!(work_authorization(doc.root_element(), &sel).as_deref(), Some("India"));
        assert_eq!(certifications(doc.root_element(), &sel).len(), 1);
    }

    #[test]
    fn test_empty_page_yields_empty_fields() {
        let doc = Html::parse_document("<html><body></body></html>");
        let fields = extract(&doc, &ModernSelectors::default());
        assert_eq!(fields, ModernFields::default());
    }
}
