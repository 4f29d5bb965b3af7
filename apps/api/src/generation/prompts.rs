// LLM prompt templates for cold email generation.
// The QA wrapper that carries retrieved context lives in llm_client::prompts.

/// Cold email instruction prompt.
/// Replace: {your_name}, {your_experience}, {your_skills}, {company_name},
///          {recruiter_name}, {platform}
pub const COLD_EMAIL_PROMPT_TEMPLATE: &str = "Generate a professional cold email for a recruiter based on the following details:
- Your Name: {your_name}
- Your Experience: {your_experience}
- Your Skills: {your_skills}
- Company Name: {company_name}
- Recruiter's Name: {recruiter_name}
- Platform: {platform}

The email should:
1. Be personalized and concise.
2. Highlight your skills and experience relevant to the job description.
3. Include a call to action (e.g., request for a call or meeting).
4. Be professional and polite.";
