use crate::enrichment::service::ProfileFields;
use crate::llm_client::prompts::NOT_SPECIFIED;
use crate::models::resume::Resume;

fn or_unspecified(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

fn list_or_unspecified(items: &[String], sep: &str) -> String {
    if items.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        items.join(sep)
    }
}

pub fn build_summary_prompt(fields: &ProfileFields) -> String {
    let years = fields
        .years_of_experience
        .map(|y| y.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    format!(
        r#"Based on the following professional profile, generate a compelling and professional career persona that highlights the person's unique value proposition and professional identity.

Professional Profile:
- Name: {name}
- Professional Title: {title}
- Years of Experience: {years}
- Specializations: {specializations}
- Key Skills: {skills}
- Achievements: {achievements}
- Industry Expertise: {industries}
- Career Goals: {goals}

Please provide:
1. A professional persona summary (2-3 paragraphs) that captures their professional identity
2. Their unique value proposition (1 paragraph)
3. Key recommendations for personal branding (3-4 bullet points)

Format the response in JSON with keys: "personaSummary", "uniqueValue", "recommendations" (array of strings)"#,
        name = fields.persona_name,
        title = fields.professional_title,
        specializations = list_or_unspecified(&fields.specializations, ", "),
        skills = list_or_unspecified(&fields.key_skills, ", "),
        achievements = list_or_unspecified(&fields.achievements, "; "),
        industries = list_or_unspecified(&fields.industry_expertise, ", "),
        goals = or_unspecified(fields.career_goals.as_deref()),
    )
}

pub fn build_resume_prompt(resume: &Resume, years_of_experience: u32) -> String {
    let info = &resume.content.personal_info;

    let work = if resume.content.work_experience.is_empty() {
        "No work experience provided".to_string()
    } else {
        resume
            .content
            .work_experience
            .iter()
            .enumerate()
            .map(|(i, job)| {
                format!(
                    "{}. {} at {} ({} - {})\n   Description: {}",
                    i + 1,
                    job.position,
                    job.company,
                    job.start_date,
                    job.end_date,
                    job.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let education = if resume.content.education.is_empty() {
        "No education provided".to_string()
    } else {
        resume
            .content
            .education
            .iter()
            .enumerate()
            .map(|(i, edu)| {
                format!(
                    "{}. {} in {} from {}",
                    i + 1,
                    edu.degree,
                    edu.field,
                    edu.institution
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"Based on the following resume information, extract and generate a professional career persona.

RESUME INFORMATION:
Name: {name}
Current Job Title: {title}
Email: {email}
Location: {location}
Professional Objective: {objective}

Work Experience:
{work}

Education:
{education}

Skills: {skills}

Years of Experience: {years_of_experience}

Generate the following in JSON format:
1. "personaName" - A professional persona name (e.g., "Senior Tech Leader")
2. "professionalTitle" - Current professional title from resume
3. "yearsOfExperience" - Number of years in the field
4. "specializations" - Array of 3-5 key specializations based on education and experience
5. "keySkills" - Array of 5-7 key skills from resume
6. "achievements" - Array of 3-5 major achievements from work experience
7. "industryExpertise" - Array of 3-4 industries they have experience in
8. "careerGoals" - A brief statement of career goals based on their trajectory
9. "personaSummary" - A compelling 2-3 paragraph professional summary
10. "uniqueValue" - Their unique value proposition (1 paragraph)
11. "recommendations" - Array of 3-4 personal branding recommendations

Return ONLY valid JSON, no additional text."#,
        name = or_unspecified(Some(&info.full_name)),
        title = or_unspecified(Some(&info.job_title)),
        email = or_unspecified(Some(&info.email)),
        location = or_unspecified(Some(&info.location)),
        objective = or_unspecified(Some(&info.objective)),
        skills = list_or_unspecified(&resume.content.skills, ", "),
    )
}
