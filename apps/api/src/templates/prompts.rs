// Built-in prompt bodies. Each placeholder written here must also be declared
// in `templates::builtin_templates`, or the store refuses to load.

/// Job-fit scoring prompt. Replace `{{resume_text}}`, `{{job_title}}`, `{{job_desc}}`.
/// The reply must be a bare JSON object: `{"fit_score": <0-10>, "reason": "..."}`.
pub const RANK_JOB_FIT_TEMPLATE: &str = r#"You are a pragmatic technical recruiter. Compare the candidate's resume with the job posting below and judge how well the candidate fits the role.

JOB TITLE:
{{job_title}}

JOB DESCRIPTION:
{{job_desc}}

CANDIDATE RESUME (most relevant excerpts):
{{resume_text}}

Scoring guide:
- 9-10: meets every hard requirement and most nice-to-haves
- 7-8: meets the hard requirements with minor gaps
- 4-6: partial overlap, notable gaps in required skills or seniority
- 0-3: little relevant experience

Respond with a single JSON object and nothing else. Use exactly these two keys:
{"fit_score": 7.5, "reason": "One or two sentences naming the strongest matches and the biggest gap."}

HARD RULES:
1. `fit_score` is a number between 0.0 and 10.0
2. `reason` is a plain string
3. Do NOT wrap the JSON in markdown code fences
4. Do NOT add any text before or after the JSON object"#;

/// Cover letter prompt. Replace `{{job_title}}`, `{{job_desc}}`, `{{resume_text}}`, `{{brand_voice}}`.
pub const COVER_LETTER_TEMPLATE: &str = r#"You are writing a tailored cover letter for the role of {{job_title}}.

Write in this voice: {{brand_voice}}

JOB DESCRIPTION:
{{job_desc}}

CANDIDATE RESUME (source of truth, ONLY use facts from here):
{{resume_text}}

Write the letter as plain text that renders cleanly as Markdown:
- 250 to 350 words
- An opening paragraph that names the role and why the candidate is interested
- A bullet list of exactly three highlights drawn from the resume, each starting with "- "
- A closing paragraph that ends with a clear call to action (for example, inviting a conversation or interview)

HARD RULES:
1. Do NOT invent employers, titles, dates, or metrics that are not in the resume
2. Do NOT include YAML front matter
3. Do NOT return JSON
4. Do NOT use code blocks or code fences
5. Return only the letter body, with no preamble or sign-off notes"#;
