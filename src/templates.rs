use crate::models::{EmailTemplate, TemplateCategory};

/// Fixed catalog of nudge and inactivity-escalation templates. Loaded fresh
/// on each call; templates are never mutated.
pub fn catalog() -> Vec<EmailTemplate> {
    vec![
        EmailTemplate {
            id: "tpl-1".to_string(),
            name: "Complete Training Nudge".to_string(),
            subject: "You're almost there! Complete your training".to_string(),
            body: "Hi {{name}},\n\nWe noticed you have started but not yet completed your \
                   training: {{course_name}}. You're making great progress!\n\nPlease take \
                   some time to finish your course. Your development matters to us.\n\nBest \
                   regards,\nTMD Team"
                .to_string(),
            category: TemplateCategory::NudgeComplete,
        },
        EmailTemplate {
            id: "tpl-2".to_string(),
            name: "15 Days Inactive".to_string(),
            subject: "We miss you on Udemy!".to_string(),
            body: "Hi {{name}},\n\nIt's been 15 days since you last accessed your Udemy \
                   license. Don't let your learning momentum slow down!\n\nLog in today and \
                   continue your development journey.\n\nBest regards,\nTMD Team"
                .to_string(),
            category: TemplateCategory::Inactive15,
        },
        EmailTemplate {
            id: "tpl-3".to_string(),
            name: "30 Days Inactive".to_string(),
            subject: "Your Udemy license needs attention".to_string(),
            body: "Hi {{name}},\n\nYour Udemy license has been inactive for 30 days. As part \
                   of our talent development initiative, we encourage you to utilize this \
                   valuable resource.\n\nPlease note that continued inactivity may result in \
                   license reallocation.\n\nBest regards,\nTMD Team"
                .to_string(),
            category: TemplateCategory::Inactive30,
        },
        EmailTemplate {
            id: "tpl-4".to_string(),
            name: "60 Days Inactive".to_string(),
            subject: "Action Required: Udemy License Review".to_string(),
            body: "Hi {{name}},\n\nYour Udemy license has been unused for 60 days. We want to \
                   ensure our learning resources are being utilized effectively.\n\nPlease \
                   respond to this email or log into Udemy within the next 7 days to retain \
                   your license.\n\nBest regards,\nTMD Team"
                .to_string(),
            category: TemplateCategory::Inactive60,
        },
        EmailTemplate {
            id: "tpl-5".to_string(),
            name: "90 Days Inactive - Final Notice".to_string(),
            subject: "Final Notice: Udemy License Revocation".to_string(),
            body: "Hi {{name}},\n\nThis is a final notice regarding your Udemy license which \
                   has been inactive for 90 days.\n\nUnless you log in and begin using your \
                   license within the next 48 hours, it will be revoked and reassigned.\n\n\
                   If you have questions, please contact the TMD team.\n\nBest regards,\n\
                   TMD Team"
                .to_string(),
            category: TemplateCategory::Inactive90,
        },
    ]
}

pub fn find(id: &str) -> Option<EmailTemplate> {
    catalog().into_iter().find(|t| t.id == id)
}

pub fn find_by_category(category: TemplateCategory) -> Option<EmailTemplate> {
    catalog().into_iter().find(|t| t.category == category)
}

/// Literal `{{token}}` substitution. Every occurrence of a provided token is
/// replaced; tokens without a value stay verbatim in the output. No escaping
/// is applied, so templates must come from the trusted catalog.
pub fn personalize(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    out
}
