//! Server-rendered launcher page.

use std::fmt::Write;

use crate::blur::{on_blur, InputField};
use crate::config::LauncherConfig;
use crate::form::{
    RawLaunchForm, AGENT_NAME_KEY, ENVIRONMENT_NAME_KEY, NUM_STEPS_KEY, OBSERVATION_DELTA_KEY,
    VIDEO_FPS_KEY,
};

/// Banner shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAlert {
    /// The submitted form failed validation.
    Invalid(String),
    /// A session request was sent and failed.
    Failure(String),
}

impl PageAlert {
    fn class(&self) -> &'static str {
        match self {
            PageAlert::Invalid(_) => "alert alert-invalid",
            PageAlert::Failure(_) => "alert alert-failure",
        }
    }

    fn message(&self) -> &str {
        match self {
            PageAlert::Invalid(m) | PageAlert::Failure(m) => m,
        }
    }
}

/// Numeric inputs carrying `form`'s values, with the "has value" state
/// applied as a blur would leave it.
pub fn numeric_fields(form: &RawLaunchForm) -> [InputField; 3] {
    let mut fields = [
        InputField::new(NUM_STEPS_KEY, form.num_steps.as_str()),
        InputField::new(OBSERVATION_DELTA_KEY, form.observation_delta.as_str()),
        InputField::new(VIDEO_FPS_KEY, form.video_fps.as_str()),
    ];
    for field in fields.iter_mut() {
        on_blur(field);
    }
    fields
}

fn label(name: &str) -> &'static str {
    match name {
        NUM_STEPS_KEY => "Number of steps",
        OBSERVATION_DELTA_KEY => "Observation delta (ms)",
        VIDEO_FPS_KEY => "Video fps",
        _ => "",
    }
}

pub fn render_form(config: &LauncherConfig, form: &RawLaunchForm, alert: Option<&PageAlert>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n<title>Multivac</title>\n\
         <link rel=\"stylesheet\" href=\"/static/launcher.css\">\n\
         </head>\n<body>\n",
    );

    if let Some(alert) = alert {
        let _ = writeln!(
            html,
            "<div class=\"{}\" role=\"alert\"><pre>{}</pre></div>",
            alert.class(),
            escape_html(alert.message().trim_end())
        );
    }

    html.push_str("<form id=\"launcher-form\" method=\"post\" action=\"/launch\">\n");
    write_select(&mut html, ENVIRONMENT_NAME_KEY, "Environment", &config.environments, &form.environment_name);
    write_select(&mut html, AGENT_NAME_KEY, "Agent", &config.agents, &form.agent_name);

    for field in numeric_fields(form) {
        let _ = writeln!(
            html,
            "<div class=\"validate-input\"><label>{}<input class=\"{}\" type=\"text\" name=\"{}\" value=\"{}\"></label></div>",
            label(field.name),
            field.class_attr(),
            field.name,
            escape_html(&field.value)
        );
    }

    html.push_str(
        "<button type=\"submit\">Launch</button>\n</form>\n\
         <script src=\"/static/launcher.js\"></script>\n</body>\n</html>\n",
    );
    html
}

fn write_select(html: &mut String, name: &str, label: &str, options: &[String], selected: &str) {
    let _ = writeln!(html, "<label>{}<select name=\"{}\">", label, name);
    for option in options {
        let option = escape_html(option);
        let attr = if option == escape_html(selected) { " selected" } else { "" };
        let _ = writeln!(html, "<option value=\"{0}\"{1}>{0}</option>", option, attr);
    }
    html.push_str("</select></label>\n");
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
