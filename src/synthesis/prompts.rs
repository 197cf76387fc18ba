//! Persona and task prompts for the three synthesis stages.

use crate::intake::{ApplicationRecord, RoleConfig};

/// A specialist the pipeline consults: who it is and what it must produce.
pub struct Specialist {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

impl Specialist {
    /// System prompt introducing the specialist.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are the {}.\n\nYour goal: {}\n\n{}",
            self.role, self.goal, self.backstory
        )
    }
}

pub const SKILL_EVALUATOR: Specialist = Specialist {
    role: "Technical Skills Evaluator",
    goal: "Assess candidate technical skills based on their stated experience and identify \
           where follow-up is needed.",
    backstory: "You are a senior technical interviewer with deep expertise across multiple \
                domains. You quickly assess a candidate's technical background and are known \
                for fair but thorough evaluations.",
};

pub const RESUME_ANALYST: Specialist = Specialist {
    role: "Resume Intelligence Specialist",
    goal: "Extract, analyze, and cross-reference information from resumes with stated \
           qualifications to identify strengths and potential concerns.",
    backstory: "You are an expert at parsing resumes. You spot inconsistencies, identify key \
                achievements, and understand how a background aligns with job requirements.",
};

pub const APPLICATION_WRITER: Specialist = Specialist {
    role: "Application Synthesis Specialist",
    goal: "Create comprehensive, well-structured job applications that present candidates in \
           the best possible light while maintaining accuracy.",
    backstory: "You are a master at crafting job applications. You highlight strengths, address \
                weaknesses honestly, and present information the way hiring managers expect.",
};

/// Task for the skills evaluation stage.
pub fn skill_assessment_task(config: &RoleConfig, record: &ApplicationRecord) -> String {
    format!(
        "Analyze the candidate's technical skills for the {role} position.\n\
         Required skills: {required}.\n\
         Optional skills: {optional}.\n\
         Candidate's stated experience:\n{skills}\n\n\
         Produce a detailed technical assessment including:\n\
         1. Skill ratings (1-5 scale) for each mentioned skill\n\
         2. Strengths and areas for development\n\
         3. Overall technical fit for the role\n\
         4. Recommendations for skill development if needed",
        role = config.role.title(),
        required = config.required_skills.join(", "),
        optional = config.optional_skills.join(", "),
        skills = record.skills_json(),
    )
}

/// Task for the resume analysis stage.
pub fn resume_analysis_task(record_json: &str, record: &ApplicationRecord) -> String {
    let resume = record
        .resume_text
        .as_deref()
        .unwrap_or("No resume provided");
    format!(
        "Analyze the provided resume and cross-reference it with the stated qualifications.\n\
         Resume text:\n'''\n{resume}\n'''\n\n\
         Stated profile:\n{record_json}\n\n\
         Produce a resume analysis including:\n\
         1. Key achievements and experiences\n\
         2. Consistency check against the stated information\n\
         3. Notable accomplishments that strengthen the application\n\
         4. Gaps or areas that need clarification"
    )
}

/// Task for the final stage, given the outputs of the first two.
pub fn application_task(
    config: &RoleConfig,
    record_json: &str,
    skill_assessment: &str,
    resume_analysis: &str,
) -> String {
    format!(
        "Create a comprehensive job application for the {role} position using all gathered \
         information. Present the candidate in the best possible light while maintaining accuracy.\n\n\
         Applicant record:\n{record_json}\n\n\
         Technical skills assessment:\n{skill_assessment}\n\n\
         Resume analysis:\n{resume_analysis}\n\n\
         Write a complete, professionally formatted application in markdown including:\n\
         1. Executive summary highlighting key strengths\n\
         2. All personal and professional details\n\
         3. Technical skills assessment summary\n\
         4. Experience highlights\n\
         5. Application status and next steps",
        role = config.role.title(),
    )
}
