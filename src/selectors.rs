use anyhow::{anyhow, Context, Result};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorTable {
    pub modern: ModernSelectors,
    pub legacy: LegacySelectors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModernSelectors {
    pub markers: Vec<String>,

    pub name: Vec<String>,
    pub email: Vec<String>,
    pub location: Vec<String>,
    pub total_experience: Vec<String>,
    pub salary: Vec<String>,
    pub current_position: Vec<String>,
    pub highest_degree: Vec<String>,
    pub contact_lines: Vec<String>,

    pub headline: Vec<String>,
    pub key_skills: Vec<String>,
    pub may_also_know: Vec<String>,
    // Class of the may-also-know group, which sits inside the key skills block.
    pub may_also_know_group: String,

    pub work_summary: Vec<String>,
    pub work_detail_rows: Vec<String>,
    pub work_detail_label: String,
    pub work_detail_value: String,

    pub experience_items: Vec<String>,
    pub experience_card: String,
    pub gap_container: String,
    pub designation: Vec<String>,
    pub dates: Vec<String>,
    pub description: Vec<String>,
    pub gap_duration: Vec<String>,
    pub gap_period: Vec<String>,

    pub project_cards: Vec<String>,
    pub project_name: Vec<String>,
    pub project_duration: Vec<String>,
    pub project_text: String,
    pub project_head: String,
    pub project_skills: Vec<String>,
    pub project_role_description: Vec<String>,
    pub project_description: Vec<String>,

    pub education_entries: Vec<String>,
    pub degree_line: Vec<String>,
    pub education_type: Vec<String>,
    pub institution: Vec<String>,

    pub certification_entries: Vec<String>,
    pub certification_course: Vec<String>,
    pub certification_vendor: Vec<String>,

    pub it_skill_rows: Vec<String>,
    // `{n}` is replaced by the column index.
    pub it_skill_cell: Vec<String>,
    pub it_skill_fallback_cell: String,

    pub languages: Vec<String>,

    pub personal_details_row: Vec<String>,
    pub desired_job_row: Vec<String>,
    pub work_authorization_row: Vec<String>,
    pub table_cell: String,
}

impl Default for ModernSelectors {
    fn default() -> Self {
        Self {
            markers: list(&[
                ".profile-width-content",
                ".work-exp-card",
                ".cv-educ",
                ".cv-prev-it-skills",
                "#cv-prev-it-skills",
            ]),

            name: list(&[".TuXA7.ellipsis", ".TuXA7"]),
            email: list(&[".rL5xY.ellipsis", ".rL5xY"]),
            location: list(&[".location"]),
            total_experience: list(&[".QY5cK [title*='y']"]),
            salary: list(&[".QY5cK [title*='Lacs']"]),
            current_position: list(&["._0g20Z .ellipsis:nth-child(1)"]),
            highest_degree: list(&["._0g20Z .ellipsis:nth-child(2)"]),
            contact_lines: list(&[".rL5xY", ".QY5cK", ".contact"]),

            headline: list(&["blockquote.about-candidates", ".Mqi95.about-candidates"]),
            key_skills: list(&[
                "._8QjY0 .hPNKf.Qu1i6 .read-more .suggestor-tag .txt.ellipsis",
                ".Mqi95 + ._8QjY0 .focusable.suggestor-tag .txt.ellipsis",
                ".oMVmh + span .suggestor-tag .txt",
            ]),
            may_also_know: list(&[
                ".ZVSp3 .focusable.suggestor-tag .txt.ellipsis",
                ".ZVSp3 .suggestor-tag .txt",
            ]),
            may_also_know_group: "ZVSp3".to_string(),

            work_summary: list(&["._4pcQv .T74Ao", ".T74Ao"]),
            work_detail_rows: list(&[".s81Wd .OMOoI"]),
            work_detail_label: ".RHIwQ".to_string(),
            work_detail_value: ".cMaXa".to_string(),

            experience_items: list(&[
                ".work-exp > .work-exp-card, .work-exp > .gap-cont",
                ".work-exp-card, .gap-cont",
            ]),
            experience_card: ".work-exp-card".to_string(),
            gap_container: ".gap-cont".to_string(),
            designation: list(&[".exp-label .desig", ".desig"]),
            dates: list(&[".exp-label .dates", ".dates span", ".dates"]),
            description: list(&[".desc"]),
            gap_duration: list(&[".gap-duration.desig", ".gap-duration"]),
            gap_period: list(&[".gap-date.dates", ".gap-date"]),

            project_cards: list(&[".other-projects .exp-card"]),
            project_name: list(&[".card-head .exp-text"]),
            project_duration: list(&[".card-head .exp-label"]),
            project_text: ".exp-text".to_string(),
            project_head: "card-head".to_string(),
            project_skills: list(&[".skills.exp-text"]),
            project_role_description: list(&[".role-desc:not(.proj-desc)"]),
            project_description: list(&[".proj-desc"]),

            education_entries: list(&[".cv-educ .edu-wrapper", ".cv-educ .edu-head"]),
            degree_line: list(&[".edu-label .desig", ".desig"]),
            education_type: list(&[".edu-type"]),
            institution: list(&[".edu-label .dates .institue", ".institue"]),

            certification_entries: list(&[
                ".certification-wrapper .certification-body",
                ".certification-body",
            ]),
            certification_course: list(&[".certification-course"]),
            certification_vendor: list(&[".certification-vendor"]),

            it_skill_rows: list(&[
                "#cv-prev-it-skills .tbody .tr",
                ".cv-prev-it-skills .tbody .tr",
            ]),
            it_skill_cell: list(&[".col-{n} .data-cell", ".col-{n}"]),
            it_skill_fallback_cell: ".td".to_string(),

            languages: list(&[".oHpMk .ll7Em", ".ll7Em"]),

            personal_details_row: list(&[
                "._3PVFm .tbody .tr",
                ".b3iaN .details-prev .tbody .tr",
            ]),
            desired_job_row: list(&[".TuBlL .tbody .tr", ".TuBlL .details-prev .tbody .tr"]),
            work_authorization_row: list(&[".work-auth .tbody .tr"]),
            table_cell: ".table-cell".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacySelectors {
    pub line: String,
    pub header: String,
    pub label: String,
    pub title: String,
    pub location: String,
    pub bullet: String,
    pub first_name: String,
    pub last_name: String,
    pub contact: Vec<String>,
}

impl Default for LegacySelectors {
    fn default() -> Self {
        Self {
            line: "stl_01".to_string(),
            header: "stl_14".to_string(),
            label: "stl_09".to_string(),
            title: "stl_15".to_string(),
            location: "stl_16".to_string(),
            bullet: "stl_17".to_string(),
            first_name: "stl_07".to_string(),
            last_name: "stl_08".to_string(),
            contact: list(&["stl_09", "stl_11", "stl_13"]),
        }
    }
}

impl SelectorTable {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read selector table: {}", path.display()))?;
        let table: SelectorTable = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse selector table: {}", path.display()))?;
        table.validate()?;
        Ok(table)
    }

    // Every selector must parse; a bad entry would otherwise silently blank a field.
    pub fn validate(&self) -> Result<()> {
        let m = &self.modern;
        let groups: [&[String]; 34] = [
            &m.markers,
            &m.name,
            &m.email,
            &m.location,
            &m.total_experience,
            &m.salary,
            &m.current_position,
            &m.highest_degree,
            &m.contact_lines,
            &m.headline,
            &m.key_skills,
            &m.may_also_know,
            &m.work_summary,
            &m.work_detail_rows,
            &m.experience_items,
            &m.designation,
            &m.dates,
            &m.description,
            &m.gap_duration,
            &m.gap_period,
            &m.project_cards,
            &m.project_name,
            &m.project_duration,
            &m.project_skills,
            &m.project_role_description,
            &m.project_description,
            &m.education_entries,
            &m.degree_line,
            &m.education_type,
            &m.institution,
            &m.certification_entries,
            &m.certification_course,
            &m.certification_vendor,
            &m.it_skill_rows,
        ];
        let singles = [
            &m.work_detail_label,
            &m.work_detail_value,
            &m.experience_card,
            &m.gap_container,
            &m.project_text,
            &m.it_skill_fallback_cell,
            &m.table_cell,
        ];

        let all = groups
            .iter()
            .flat_map(|group| group.iter())
            .chain(m.languages.iter())
            .chain(m.personal_details_row.iter())
            .chain(m.desired_job_row.iter())
            .chain(m.work_authorization_row.iter())
            .chain(singles);

        for css in all {
            Selector::parse(css).map_err(|e| anyhow!("Invalid selector '{}': {}", css, e))?;
        }
        for css in &m.it_skill_cell {
            let concrete = css.replace("{n}", "0");
            Selector::parse(&concrete)
                .map_err(|e| anyhow!("Invalid selector '{}': {}", css, e))?;
        }
        Ok(())
    }
}
