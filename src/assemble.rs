use chrono::{DateTime, Utc};

use crate::classify::find_year;
use crate::legacy::{LegacyEntry, LegacyFields};
use crate::models::{
    Certification, Dialect, Education, Engagement, ExperienceItem, ProfileHeader, Project,
    ResumeRecord, WorkSummary, DesiredJobDetails, PersonalDetails,
};
use crate::modern::{ModernCard, ModernExperience, ModernFields, ModernProject};

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedFields {
    Modern(ModernFields),
    Legacy(LegacyFields),
}

pub fn assemble(fields: &ExtractedFields, timestamp: DateTime<Utc>) -> ResumeRecord {
    match fields {
        ExtractedFields::Modern(m) => assemble_modern(m, timestamp),
        ExtractedFields::Legacy(l) => assemble_legacy(l, timestamp),
    }
}

pub fn split_designation(text: &str) -> (String, Option<String>) {
    match text.split_once(" at ") {
        Some((designation, company)) if !company.trim().is_empty() => {
            (designation.trim().to_string(), Some(company.trim().to_string()))
        }
        _ => (text.trim().to_string(), None),
    }
}

fn card_to_engagement(card: &ModernCard) -> Engagement {
    let (designation, company) = card
        .designation
        .as_deref()
        .map(split_designation)
        .unwrap_or_default();
    Engagement {
        designation,
        company,
        location: None,
        duration: card.dates.clone(),
        description: card.description.clone(),
    }
}

fn modern_project(project: &ModernProject) -> Project {
    Project {
        name: project.title.clone(),
        role: project.role.clone(),
        duration: project.duration.clone(),
        tech_stack: project.skills.clone(),
        description: project.project_description.clone(),
        role_description: project.role_description.clone(),
    }
}

fn assemble_modern(m: &ModernFields, timestamp: DateTime<Utc>) -> ResumeRecord {
    ResumeRecord {
        dialect: Dialect::Modern,
        personal_info: m.personal_info.clone(),
        header: m.header.clone(),
        profile: m.headline.clone(),
        work_summary: m.work_summary.clone(),
        key_skills: m.key_skills.clone(),
        may_also_know: m.may_also_know.clone(),
        work_experience: m
            .experience
            .iter()
            .map(|item| match item {
                ModernExperience::Card(card) => ExperienceItem::Engagement(card_to_engagement(card)),
                ModernExperience::Gap(gap) => ExperienceItem::Gap(gap.clone()),
            })
            .collect(),
        projects: m.projects.iter().map(modern_project).collect(),
        education: m.education.clone(),
        certifications: m.certifications.clone(),
        it_skills: m.it_skills.clone(),
        languages: m.languages.clone(),
        achievements: Vec::new(),
        personal_details: m.personal_details.clone(),
        desired_job_details: m.desired_job.clone(),
        work_authorization: m.work_authorization.clone(),
        timestamp,
    }
}

fn legacy_engagement(entry: &LegacyEntry) -> ExperienceItem {
    ExperienceItem::Engagement(Engagement {
        designation: entry.secondary.clone().unwrap_or_default(),
        company: entry.primary.clone(),
        location: entry.location.clone(),
        duration: entry.duration.clone(),
        description: entry.description_text(),
    })
}

fn legacy_project(entry: &LegacyEntry) -> Project {
    // A project with only a title line is named by that line.
    let (name, role) = match (&entry.primary, &entry.secondary) {
        (Some(name), role) => (name.clone(), role.clone()),
        (None, Some(name)) => (name.clone(), None),
        (None, None) => (String::new(), None),
    };
    Project {
        name,
        role,
        duration: entry.duration.clone(),
        tech_stack: entry.tech_stack.clone(),
        description: entry.description_text(),
        role_description: None,
    }
}

fn legacy_education(entry: &LegacyEntry) -> Education {
    let year = [&entry.duration, &entry.secondary, &entry.primary]
        .into_iter()
        .flatten()
        .find_map(|text| find_year(text));
    Education {
        degree: entry.secondary.clone().unwrap_or_default(),
        specialization: None,
        year,
        kind: None,
        institution: entry.primary.clone(),
    }
}

fn assemble_legacy(l: &LegacyFields, timestamp: DateTime<Utc>) -> ResumeRecord {
    ResumeRecord {
        dialect: Dialect::Legacy,
        personal_info: l.personal_info.clone(),
        header: ProfileHeader::default(),
        profile: Some(l.profile.clone()),
        work_summary: WorkSummary::default(),
        key_skills: l.skills.clone(),
        may_also_know: Vec::new(),
        work_experience: l.experience.iter().map(legacy_engagement).collect(),
        projects: l.projects.iter().map(legacy_project).collect(),
        education: l.education.iter().map(legacy_education).collect(),
        certifications: l
            .certifications
            .iter()
            .map(|course| Certification {
                course: course.clone(),
                vendor: None,
            })
            .collect(),
        it_skills: Vec::new(),
        languages: Vec::new(),
        achievements: l.achievements.clone(),
        personal_details: PersonalDetails::default(),
        desired_job_details: DesiredJobDetails::default(),
        work_authorization: None,
        timestamp,
    }
}
