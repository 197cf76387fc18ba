//! Applicant-facing prompt text for each stage of the intake.

use super::model::JobRole;
use super::roles::RoleConfig;
use super::state::Stage;

/// Greeting shown on first contact and after every reset.
pub fn welcome_message() -> String {
    let roles: Vec<String> = JobRole::ALL
        .iter()
        .map(|r| format!("• {}", r.title()))
        .collect();
    format!(
        "🎯 **Welcome to SmartApply!**\n\n\
         I'm your job application assistant. We'll have a short conversation and \
         I'll put your application together from your answers.\n\n\
         **Available Positions:**\n{}\n\n\
         Which position interests you? (Just type the role name)",
        roles.join("\n")
    )
}

/// Re-prompt when no role keyword was found.
pub fn role_not_recognized() -> String {
    let roles: Vec<String> = JobRole::ALL
        .iter()
        .map(|r| format!("• {}", r.title()))
        .collect();
    format!("I didn't catch that. Please choose from:\n{}", roles.join("\n"))
}

pub fn role_selected(role: JobRole) -> String {
    format!(
        "Excellent choice! I'll help you apply for the **{}** position. 🚀\n\n\
         Let's start with some basic information. What's your full name?",
        role.title()
    )
}

pub fn name_invalid() -> String {
    "Please provide your full name:".to_string()
}

pub fn name_accepted(name: &str) -> String {
    format!("Nice to meet you, {name}! 👋\n\nWhat's your email address?")
}

pub fn email_invalid() -> String {
    "That doesn't look like a valid email address. Please provide a valid email \
     (e.g., john@example.com):"
        .to_string()
}

pub fn email_skipped() -> String {
    "Let's skip the email for now. We'll continue with the application.".to_string()
}

pub fn email_accepted(email: &str) -> String {
    format!("Perfect! 📧 Got your email as {email}.")
}

pub fn phone_invalid() -> String {
    "Please provide a valid phone number (at least 10 digits):".to_string()
}

/// The question that opens a field-collection stage.
///
/// Stages that don't ask a single question (Welcome, Skills, Processing...)
/// return `None`.
pub fn field_question(stage: Stage) -> Option<&'static str> {
    let q = match stage {
        Stage::Name => "What's your full name?",
        Stage::Email => "What's your email address?",
        Stage::Phone => "What's your phone number?",
        Stage::CurrentCtc => {
            "What's your current CTC (Cost to Company)? You can mention it in LPA or a specific amount."
        }
        Stage::ExpectedCtc => "What's your expected CTC?",
        Stage::TotalExperience => "How many years of total work experience do you have?",
        Stage::CurrentCompany => "What's your current company name?",
        Stage::CurrentRole => "What's your current job title/role?",
        Stage::Location => "Which city/location are you based in?",
        Stage::NoticePeriod => "What's your notice period?",
        _ => return None,
    };
    Some(q)
}

pub fn skills_intro(role: JobRole) -> String {
    format!(
        "Perfect! Now let's assess your technical skills for the {} role. 🔧",
        role.title()
    )
}

/// The question for one skill, suffixed with whether the role requires it.
pub fn skill_question(config: &RoleConfig, skill: &str) -> String {
    let marker = if config.is_required(skill) {
        " (Required)"
    } else {
        " (Optional)"
    };

    match skill {
        "python" => format!("How many years of experience do you have with Python programming?{marker}"),
        "machine_learning" => format!(
            "What's your experience level with Machine Learning?{marker} (years or beginner/intermediate/advanced)"
        ),
        "sql" => format!("How would you rate your SQL experience?{marker} (years or skill level)"),
        "statistics" => {
            format!("What's your background in Statistics and statistical modeling?{marker}")
        }
        "programming" => format!(
            "What's your overall programming experience?{marker} (years and primary languages)"
        ),
        "algorithms" => {
            format!("How comfortable are you with Data Structures and Algorithms?{marker}")
        }
        "system_design" => {
            format!("What's your experience with System Design and Architecture?{marker}")
        }
        "product_strategy" => format!(
            "How many years of experience do you have in Product Strategy and Planning?{marker}"
        ),
        "stakeholder_management" => format!(
            "What's your experience managing stakeholders and cross-functional teams?{marker}"
        ),
        "analytics" => format!(
            "How comfortable are you with data analysis and metrics interpretation?{marker}"
        ),
        other => format!(
            "What's your experience with {}?{marker}",
            config.describe(other)
        ),
    }
}

pub fn skill_noted(skill: &str) -> String {
    format!("Great! Noted your {} experience. 📝", skill.replace('_', " "))
}

pub fn skills_complete() -> String {
    "Excellent! That covers all the technical skills. 🎯".to_string()
}

pub fn resume_request() -> String {
    "Now, please paste your resume here, or if you don't have it handy, just type 'skip' \
     and we'll proceed with the information you've provided."
        .to_string()
}

pub fn additional_info_request() -> String {
    "Thanks! Is there anything else you'd like to add that might be relevant for this \
     application? (Or type 'done' to proceed)"
        .to_string()
}

pub fn processing_started() -> String {
    "🚀 **Processing your application...**\n\n\
     I'm now analyzing your profile and creating your job application. This may take a moment..."
        .to_string()
}

pub fn application_complete() -> String {
    "✅ **Application Complete!**".to_string()
}

pub fn apply_again_hint() -> String {
    "💡 **Want to apply for another position?** Just type 'restart' to begin a new application!"
        .to_string()
}

pub fn synthesis_failed(error: &str) -> String {
    format!("❌ Sorry, there was an error processing your application: {error}")
}

pub fn synthesis_retry_hint() -> String {
    "Please try again by typing 'restart', or contact support.".to_string()
}

/// Reply to messages that arrive while a failed application is stalled.
pub fn stalled_hint() -> String {
    "Your last application could not be processed. Type 'restart' to begin a new application."
        .to_string()
}
