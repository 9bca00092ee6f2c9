use askama::Template;
use axum::response::Html;

use crate::errors::AppError;
use crate::models::{job::Job, resume::Resume, suggestion::Suggestion};

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub username: Option<String>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub username: String,
    pub resume: Option<Resume>,
}

#[derive(Template)]
#[template(path = "resume.html")]
pub struct ResumePage {
    pub username: String,
}

/// `interest` is `None` until a lookup is submitted.
#[derive(Template)]
#[template(path = "suggestion.html")]
pub struct SuggestionPage {
    pub interest: Option<String>,
    pub suggestion: Option<Suggestion>,
}

#[derive(Template)]
#[template(path = "jobs.html")]
pub struct JobsPage {
    pub jobs: Vec<Job>,
}

#[derive(Template)]
#[template(path = "admin_jobs.html")]
pub struct AdminJobsPage {
    pub jobs: Vec<Job>,
}

#[derive(Template)]
#[template(path = "admin_suggestions.html")]
pub struct AdminSuggestionsPage {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub status: u16,
    pub message: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_content_is_escaped() {
        let page = SuggestionPage {
            interest: Some("<script>".into()),
            suggestion: None,
        };
        let html = page.render().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_dashboard_without_resume() {
        let html = DashboardPage {
            username: "alice".into(),
            resume: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("You have not created a résumé yet"));
    }
}
