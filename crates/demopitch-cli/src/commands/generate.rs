use anyhow::Result;
use console::style;
use demopitch::config::{Config, HACKATHON_KEY, MODEL_KEY};
use demopitch::pitch::{build_fallback_script, build_prompt, PitchContext, ScriptTiming};
use demopitch::providers::google::GOOGLE_DEFAULT_MODEL;
use demopitch::providers::{ApiRevision, GoogleClient};
use demopitch::resolution::{CatalogCache, LatestResolution, ModelResolver, ResolutionError};
use std::sync::Arc;

use super::resolve_api_key;
use crate::cli::GenerateArgs;

/// Where the printed script came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptSource {
    Generated { model: String, revision: ApiRevision },
    Fallback { reason: String },
}

pub fn status_line(source: &ScriptSource) -> String {
    match source {
        ScriptSource::Generated { model, revision } => {
            format!("Success! Script generated via {} ({}).", model, revision)
        }
        ScriptSource::Fallback { reason } => format!(
            "Using the offline template because: {}.",
            reason.trim_end_matches('.')
        ),
    }
}

fn context_from_args(args: &GenerateArgs, config: &Config) -> PitchContext {
    let hackathon_name = args
        .hackathon
        .clone()
        .or_else(|| config.get_param::<String>(HACKATHON_KEY).ok())
        .unwrap_or_default();
    PitchContext {
        project_name: args.project_name.clone(),
        problem: args.problem.clone(),
        solution: args.solution.clone(),
        tech_stack: args.tech_stack.clone(),
        target_users: args.target_users.clone(),
        hackathon_name,
    }
}

fn fallback_reason(error: &ResolutionError) -> String {
    match error {
        ResolutionError::MissingApiKey => format!(
            "{}. Set GOOGLE_API_KEY or pass --api-key to hit Gemini",
            error
        ),
        _ => error.to_string(),
    }
}

/// Cancels the current resolution on Ctrl-C so an in-flight generate call is
/// abandoned.
fn cancel_on_interrupt(latest: &Arc<LatestResolution>) {
    let latest = Arc::clone(latest);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            latest.cancel();
        }
    });
}

fn fallback(context: &PitchContext, reason: String) -> (String, ScriptSource) {
    (
        build_fallback_script(context),
        ScriptSource::Fallback { reason },
    )
}

async fn generate_script(
    args: &GenerateArgs,
    config: &Config,
    context: &PitchContext,
) -> (String, ScriptSource) {
    if args.offline {
        return fallback(context, "--offline was set".to_string());
    }

    let api_key = resolve_api_key(config, args.api_key.clone());
    let requested_model = args
        .model
        .clone()
        .or_else(|| config.get_param::<String>(MODEL_KEY).ok())
        .unwrap_or_else(|| GOOGLE_DEFAULT_MODEL.to_string());

    let client = match GoogleClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to the offline template");
            return fallback(context, e.to_string());
        }
    };
    let resolver = ModelResolver::new(Arc::new(client), Arc::new(CatalogCache::new()));
    let latest = Arc::new(LatestResolution::new());
    let cancel = latest.begin();
    cancel_on_interrupt(&latest);

    let prompt = build_prompt(context);
    match resolver
        .resolve_and_generate(&prompt, &api_key, &requested_model, &cancel)
        .await
    {
        Ok(resolution) => (
            resolution.text,
            ScriptSource::Generated {
                model: resolution.model,
                revision: resolution.revision,
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to the offline template");
            fallback(context, fallback_reason(&e))
        }
    }
}

pub async fn handle_generate(args: GenerateArgs) -> Result<()> {
    let config = Config::global();
    let context = context_from_args(&args, config);
    let (script, source) = generate_script(&args, config, &context).await;

    println!("{}\n", script);

    let status = status_line(&source);
    match source {
        ScriptSource::Generated { .. } => println!("{}", style(status).green()),
        ScriptSource::Fallback { .. } => println!("{}", style(status).yellow()),
    }

    let timing = ScriptTiming::measure(&script);
    println!("{}", style(timing.to_string()).dim());
    if let Some(hint) = timing.hint() {
        println!("{}", style(hint).yellow());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use demopitch::config::{CONFIG_YAML_NAME, HOST_KEY, SECRETS_YAML_NAME};
    use demopitch::providers::ProviderError;
    use serial_test::serial;
    use tempfile::TempDir;
    use test_case::test_case;

    fn args(offline: bool) -> GenerateArgs {
        GenerateArgs {
            project_name: "Tidewatch".to_string(),
            problem: "late warnings".to_string(),
            solution: "buoy fusion".to_string(),
            tech_stack: "Rust".to_string(),
            target_users: "harbor masters".to_string(),
            hackathon: Some("Surge Jam".to_string()),
            model: None,
            api_key: Some("k".to_string()),
            offline,
        }
    }

    #[test_case(
        ScriptSource::Generated { model: "gemini-1.5-pro".to_string(), revision: ApiRevision::Primary },
        "Success! Script generated via gemini-1.5-pro (v1)." ;
        "generated"
    )]
    #[test_case(
        ScriptSource::Fallback { reason: "--offline was set".to_string() },
        "Using the offline template because: --offline was set." ;
        "offline"
    )]
    #[test_case(
        ScriptSource::Fallback { reason: "quota exceeded.".to_string() },
        "Using the offline template because: quota exceeded." ;
        "single period"
    )]
    fn test_status_line(source: ScriptSource, expected: &str) {
        assert_eq!(status_line(&source), expected);
    }

    #[test_case(
        ResolutionError::MissingApiKey,
        "no Gemini API key found. Set GOOGLE_API_KEY or pass --api-key to hit Gemini" ;
        "missing key explains how to fix"
    )]
    #[test_case(
        ResolutionError::Fatal(ProviderError::EmptyResponse {
            revision: ApiRevision::Secondary,
            model: "gemini-2.0-flash".to_string(),
        }),
        "Gemini returned an empty response" ;
        "fatal error text"
    )]
    #[test_case(ResolutionError::Cancelled, "resolution was superseded or cancelled" ; "cancelled")]
    fn test_fallback_reason(error: ResolutionError, expected: &str) {
        assert_eq!(fallback_reason(&error), expected);
    }

    #[tokio::test]
    async fn test_offline_skips_network() {
        let args = args(true);
        let config = Config::new("/nonexistent/config.yaml", "/nonexistent/secrets.yaml");
        let context = context_from_args(&args, &config);
        let (script, source) = generate_script(&args, &config, &context).await;

        assert!(script.starts_with("Introduction\nHi everyone at Surge Jam,"));
        assert_eq!(
            source,
            ScriptSource::Fallback {
                reason: "--offline was set".to_string()
            }
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_client_setup_failure_prints_template() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_YAML_NAME), "GOOGLE_HOST: not a url\n").unwrap();
        let config = Config::new(
            dir.path().join(CONFIG_YAML_NAME),
            dir.path().join(SECRETS_YAML_NAME),
        );
        std::env::remove_var(HOST_KEY);

        let args = args(false);
        let context = context_from_args(&args, &config);
        let (script, source) = generate_script(&args, &config, &context).await;

        assert_eq!(script, build_fallback_script(&context));
        assert_eq!(
            status_line(&source),
            "Using the offline template because: Invalid Gemini host: not a url."
        );
    }
}
