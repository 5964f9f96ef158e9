use crate::models::persona::Persona;

use super::{chips, escape, list, page, persona_title};

const PROFESSIONAL_STYLE: &str = "body{font-family:Georgia,serif;margin:0;color:#222;background:#fff}\
header{background:#1f2a44;color:#fff;padding:40px 56px}header h1{margin:0;font-size:32px}\
header p{margin:6px 0 0;opacity:.85}main{padding:32px 56px}\
h2{border-bottom:2px solid #1f2a44;padding-bottom:4px;font-size:18px;text-transform:uppercase}\
.chip{display:inline-block;border:1px solid #1f2a44;border-radius:3px;padding:2px 8px;margin:2px}";

const CREATIVE_STYLE: &str = "body{font-family:'Helvetica Neue',Arial,sans-serif;margin:0;color:#2d2d2d;\
background:linear-gradient(135deg,#fdf0ff,#e8f4ff)}.hero{padding:48px;text-align:center}\
.hero h1{font-size:40px;margin:0;color:#7b2ff7}.hero .title{font-size:20px;color:#f107a3}\
.card{background:#fff;border-radius:16px;margin:20px 48px;padding:24px;box-shadow:0 4px 16px rgba(0,0,0,.08)}\
.chip{display:inline-block;background:#7b2ff7;color:#fff;border-radius:999px;padding:4px 12px;margin:3px}";

const TECHNICAL_STYLE: &str = "body{font-family:'Fira Code',Menlo,monospace;margin:0;background:#0d1117;color:#c9d1d9}\
.wrap{max-width:860px;margin:0 auto;padding:40px}h1{color:#58a6ff;margin-bottom:0}\
.prompt{color:#3fb950}h2{color:#d2a8ff;font-size:16px}h2::before{content:'## '}\
.chip{display:inline-block;background:#161b22;border:1px solid #30363d;padding:2px 8px;margin:2px}";

const DEFAULT_STYLE: &str = "body{font-family:Arial,sans-serif;max-width:800px;margin:40px auto;color:#333}\
h1{margin-bottom:4px}.chip{display:inline-block;background:#eee;padding:2px 8px;margin:2px}";

/// Renders a persona with the named layout. Names without a dedicated layout
/// get the minimal default one.
pub fn render_persona(persona: &Persona, template: &str) -> String {
    let (style, body) = match template {
        "professional" => (PROFESSIONAL_STYLE, professional(persona)),
        "creative" => (CREATIVE_STYLE, creative(persona)),
        "technical" => (TECHNICAL_STYLE, technical(persona)),
        _ => (DEFAULT_STYLE, minimal(persona)),
    };
    page(&persona_title(persona), style, &body)
}

fn experience_line(persona: &Persona) -> Option<String> {
    persona
        .profile
        .years_of_experience
        .map(|years| format!("{years}+ years of experience"))
}

fn professional(persona: &Persona) -> String {
    let p = &persona.profile;
    let mut out = format!("<header><h1>{}</h1>", escape(&persona.persona_name));
    if let Some(title) = &p.professional_title {
        out.push_str(&format!("<p>{}</p>", escape(title)));
    }
    if let Some(line) = experience_line(persona) {
        out.push_str(&format!("<p>{line}</p>"));
    }
    out.push_str("</header><main>");

    if let Some(summary) = &p.persona_summary {
        out.push_str(&format!("<h2>Summary</h2><p>{}</p>", escape(summary)));
    }
    if let Some(profile) = &p.professional_profile {
        out.push_str(&format!("<h2>Profile</h2><p>{}</p>", escape(profile)));
    }
    if !p.key_skills.is_empty() {
        out.push_str(&format!("<h2>Core Skills</h2><div>{}</div>", chips(&p.key_skills)));
    }
    if !p.specializations.is_empty() {
        out.push_str(&format!("<h2>Specializations</h2>{}", list(&p.specializations)));
    }
    if !p.achievements.is_empty() {
        out.push_str(&format!("<h2>Key Achievements</h2>{}", list(&p.achievements)));
    }
    if !p.industry_expertise.is_empty() {
        out.push_str(&format!(
            "<h2>Industry Expertise</h2><div>{}</div>",
            chips(&p.industry_expertise)
        ));
    }
    if let Some(value) = &p.unique_value {
        out.push_str(&format!("<h2>Value Proposition</h2><p>{}</p>", escape(value)));
    }
    if let Some(goals) = &p.career_goals {
        out.push_str(&format!("<h2>Career Goals</h2><p>{}</p>", escape(goals)));
    }
    out.push_str("</main>");
    out
}

fn creative(persona: &Persona) -> String {
    let p = &persona.profile;
    let mut out = format!("<section class=\"hero\"><h1>{}</h1>", escape(&persona.persona_name));
    if let Some(title) = &p.professional_title {
        out.push_str(&format!("<div class=\"title\">{}</div>", escape(title)));
    }
    out.push_str("</section>");

    if let Some(summary) = &p.persona_summary {
        out.push_str(&format!(
            "<div class=\"card\"><h2>My Story</h2><p>{}</p></div>",
            escape(summary)
        ));
    }
    if !p.key_skills.is_empty() {
        out.push_str(&format!(
            "<div class=\"card\"><h2>What I Do Best</h2>{}</div>",
            chips(&p.key_skills)
        ));
    }
    if !p.achievements.is_empty() {
        out.push_str(&format!(
            "<div class=\"card\"><h2>Highlights</h2>{}</div>",
            list(&p.achievements)
        ));
    }
    if let Some(value) = &p.unique_value {
        out.push_str(&format!(
            "<div class=\"card\"><h2>Why Me</h2><p>{}</p></div>",
            escape(value)
        ));
    }
    if let Some(goals) = &p.career_goals {
        out.push_str(&format!(
            "<div class=\"card\"><h2>Where I'm Headed</h2><p>{}</p></div>",
            escape(goals)
        ));
    }
    out
}

fn technical(persona: &Persona) -> String {
    let p = &persona.profile;
    let mut out = format!(
        "<div class=\"wrap\"><p class=\"prompt\">$ whoami</p><h1>{}</h1>",
        escape(&persona.persona_name)
    );
    if let Some(title) = &p.professional_title {
        out.push_str(&format!("<p>{}</p>", escape(title)));
    }
    if let Some(line) = experience_line(persona) {
        out.push_str(&format!("<p class=\"prompt\">// {line}</p>"));
    }
    if let Some(summary) = &p.persona_summary {
        out.push_str(&format!("<h2>README</h2><p>{}</p>", escape(summary)));
    }
    if !p.key_skills.is_empty() {
        out.push_str(&format!("<h2>Stack</h2><div>{}</div>", chips(&p.key_skills)));
    }
    if !p.specializations.is_empty() {
        out.push_str(&format!("<h2>Specializations</h2>{}", list(&p.specializations)));
    }
    if !p.achievements.is_empty() {
        out.push_str(&format!("<h2>Shipped</h2>{}", list(&p.achievements)));
    }
    if !p.recommendations.is_empty() {
        out.push_str(&format!("<h2>Next Steps</h2>{}", list(&p.recommendations)));
    }
    out.push_str("</div>");
    out
}

fn minimal(persona: &Persona) -> String {
    let p = &persona.profile;
    let mut out = format!("<h1>{}</h1>", escape(&persona.persona_name));
    if let Some(title) = &p.professional_title {
        out.push_str(&format!("<p><strong>{}</strong></p>", escape(title)));
    }
    if let Some(summary) = &p.persona_summary {
        out.push_str(&format!("<p>{}</p>", escape(summary)));
    }
    if !p.key_skills.is_empty() {
        out.push_str(&format!("<div>{}</div>", chips(&p.key_skills)));
    }
    out
}
