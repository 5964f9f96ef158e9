use crate::models::resume::{Education, PersonalInfo, Resume, ResumeProject, WorkExperience};

use super::{chips, escape, non_empty, page, resume_title};

const CLASSIC_STYLE: &str = "@page{size:A4;margin:0}body{font-family:'Times New Roman',serif;margin:0;padding:48px 56px;color:#111}\
h1{text-align:center;margin:0;font-size:30px}.contact{text-align:center;font-size:13px;margin:6px 0 18px}\
h2{font-size:15px;text-transform:uppercase;border-bottom:1px solid #111;margin:18px 0 8px}\
.row{display:flex;justify-content:space-between}.muted{color:#555;font-size:13px}\
.chip{display:inline-block;margin-right:10px}";

const MODERN_STYLE: &str = "@page{size:A4;margin:0}body{font-family:Inter,Arial,sans-serif;margin:0;display:flex;min-height:100vh}\
aside{width:30%;background:#243b55;color:#fff;padding:36px 24px}aside h1{font-size:24px;margin:0 0 4px}\
aside .chip{display:block;margin:4px 0}main{width:70%;padding:36px 32px;color:#222}\
h2{color:#243b55;font-size:16px;letter-spacing:1px;text-transform:uppercase}\
.muted{color:#666;font-size:12px}";

const COMPACT_STYLE: &str = "@page{size:A4;margin:0}body{font-family:Arial,sans-serif;font-size:12px;margin:0;padding:28px 36px;color:#222}\
h1{font-size:22px;margin:0}h2{font-size:13px;margin:12px 0 4px;color:#0a66c2}\
p{margin:2px 0}.muted{color:#666}.chip{display:inline-block;background:#eef3f8;padding:1px 6px;margin:1px}";

const DEFAULT_STYLE: &str = "body{font-family:Arial,sans-serif;max-width:800px;margin:40px auto;color:#333}\
.chip{display:inline-block;margin-right:8px}";

/// Renders a resume with the named layout. Unknown names get the minimal one.
pub fn render_resume(resume: &Resume, template: &str) -> String {
    let (style, body) = match template {
        "template1" => (CLASSIC_STYLE, classic(resume)),
        "template2" => (MODERN_STYLE, modern(resume)),
        "template3" => (COMPACT_STYLE, compact(resume)),
        _ => (DEFAULT_STYLE, minimal(resume)),
    };
    page(&resume_title(resume), style, &body)
}

fn contact_parts(info: &PersonalInfo) -> Vec<String> {
    [&info.email, &info.phone, &info.location, &info.website]
        .into_iter()
        .filter_map(|v| non_empty(v))
        .map(escape)
        .collect()
}

fn date_range(start: &str, end: &str) -> String {
    match (non_empty(start), non_empty(end)) {
        (Some(s), Some(e)) => format!("{} - {}", escape(s), escape(e)),
        (Some(s), None) => format!("{} - Present", escape(s)),
        (None, Some(e)) => escape(e),
        (None, None) => String::new(),
    }
}

fn experience_block(jobs: &[WorkExperience]) -> String {
    let mut out = String::new();
    for job in jobs {
        out.push_str(&format!(
            "<div class=\"entry\"><div class=\"row\"><strong>{}</strong><span class=\"muted\">{}</span></div>",
            escape(&job.position),
            date_range(&job.start_date, &job.end_date)
        ));
        if let Some(company) = non_empty(&job.company) {
            out.push_str(&format!("<div class=\"muted\">{}</div>", escape(company)));
        }
        if let Some(description) = non_empty(&job.description) {
            out.push_str(&format!("<p>{}</p>", escape(description)));
        }
        out.push_str("</div>");
    }
    out
}

fn education_block(schools: &[Education]) -> String {
    let mut out = String::new();
    for school in schools {
        let degree = match (non_empty(&school.degree), non_empty(&school.field)) {
            (Some(d), Some(f)) => format!("{} in {}", escape(d), escape(f)),
            (Some(d), None) => escape(d),
            (None, Some(f)) => escape(f),
            (None, None) => String::new(),
        };
        out.push_str(&format!(
            "<div class=\"entry\"><div class=\"row\"><strong>{}</strong><span class=\"muted\">{}</span></div>",
            escape(&school.institution),
            date_range(&school.start_date, &school.end_date)
        ));
        if !degree.is_empty() {
            out.push_str(&format!("<div>{degree}</div>"));
        }
        if let Some(gpa) = non_empty(&school.gpa) {
            out.push_str(&format!("<div class=\"muted\">GPA: {}</div>", escape(gpa)));
        }
        if let Some(info) = non_empty(&school.additional_info) {
            out.push_str(&format!("<p>{}</p>", escape(info)));
        }
        out.push_str("</div>");
    }
    out
}

fn projects_block(projects: &[ResumeProject]) -> String {
    let mut out = String::new();
    for project in projects {
        out.push_str(&format!(
            "<div class=\"entry\"><div class=\"row\"><strong>{}</strong><span class=\"muted\">{}</span></div>",
            escape(&project.name),
            escape(&project.date)
        ));
        if let Some(description) = non_empty(&project.description) {
            out.push_str(&format!("<p>{}</p>", escape(description)));
        }
        out.push_str("</div>");
    }
    out
}

/// Appends the experience, education, projects and skills sections that are present.
fn body_sections(out: &mut String, resume: &Resume, skills_in_body: bool) {
    let c = &resume.content;
    if !c.work_experience.is_empty() {
        out.push_str("<h2>Experience</h2>");
        out.push_str(&experience_block(&c.work_experience));
    }
    if !c.education.is_empty() {
        out.push_str("<h2>Education</h2>");
        out.push_str(&education_block(&c.education));
    }
    if !c.projects.is_empty() {
        out.push_str("<h2>Projects</h2>");
        out.push_str(&projects_block(&c.projects));
    }
    if skills_in_body && !c.skills.is_empty() {
        out.push_str(&format!("<h2>Skills</h2><div>{}</div>", chips(&c.skills)));
    }
}

fn classic(resume: &Resume) -> String {
    let info = &resume.content.personal_info;
    let mut out = format!("<h1>{}</h1>", escape(&info.full_name));
    if let Some(title) = non_empty(&info.job_title) {
        out.push_str(&format!("<div class=\"contact\"><em>{}</em></div>", escape(title)));
    }
    let contact = contact_parts(info);
    if !contact.is_empty() {
        out.push_str(&format!("<div class=\"contact\">{}</div>", contact.join(" | ")));
    }
    if let Some(objective) = non_empty(&info.objective) {
        out.push_str(&format!("<h2>Objective</h2><p>{}</p>", escape(objective)));
    }
    body_sections(&mut out, resume, true);
    out
}

fn modern(resume: &Resume) -> String {
    let info = &resume.content.personal_info;
    let mut out = format!("<aside><h1>{}</h1>", escape(&info.full_name));
    if let Some(title) = non_empty(&info.job_title) {
        out.push_str(&format!("<div>{}</div>", escape(title)));
    }
    let contact = contact_parts(info);
    if !contact.is_empty() {
        out.push_str("<h3>Contact</h3>");
        for part in contact {
            out.push_str(&format!("<div class=\"muted\">{part}</div>"));
        }
    }
    if !resume.content.skills.is_empty() {
        out.push_str(&format!("<h3>Skills</h3>{}", chips(&resume.content.skills)));
    }
    out.push_str("</aside><main>");
    if let Some(objective) = non_empty(&info.objective) {
        out.push_str(&format!("<h2>Profile</h2><p>{}</p>", escape(objective)));
    }
    body_sections(&mut out, resume, false);
    out.push_str("</main>");
    out
}

fn compact(resume: &Resume) -> String {
    let info = &resume.content.personal_info;
    let mut out = format!("<h1>{}</h1>", escape(&info.full_name));
    let mut subtitle = Vec::new();
    if let Some(title) = non_empty(&info.job_title) {
        subtitle.push(escape(title));
    }
    subtitle.extend(contact_parts(info));
    if !subtitle.is_empty() {
        out.push_str(&format!("<p class=\"muted\">{}</p>", subtitle.join(" · ")));
    }
    if let Some(objective) = non_empty(&info.objective) {
        out.push_str(&format!("<p>{}</p>", escape(objective)));
    }
    body_sections(&mut out, resume, true);
    out
}

fn minimal(resume: &Resume) -> String {
    let info = &resume.content.personal_info;
    let mut out = format!("<h1>{}</h1>", escape(&info.full_name));
    if let Some(title) = non_empty(&info.job_title) {
        out.push_str(&format!("<p>{}</p>", escape(title)));
    }
    body_sections(&mut out, resume, true);
    out
}
