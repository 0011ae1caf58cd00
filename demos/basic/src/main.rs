//! Basic SDK walkthrough: log a request, browse models, manage prompts.
//!
//! Reads the credential from `SPYGLASS_API_KEY`.

// Demo-specific lint allowances
#![allow(clippy::print_stdout)]

use serde_json::json;
use spyglass::Spyglass;
use spyglass::types::{CustomerParams, Message, Patch, RequestLog, Usage};

#[tokio::main]
async fn main() -> spyglass::Result<()> {
    let sdk = Spyglass::new();

    println!("=== Logging a single request ===");
    log_request(&sdk).await?;

    println!("\n=== Listing available models ===");
    list_models(&sdk).await?;

    println!("\n=== Managing prompts ===");
    manage_prompts(&sdk).await?;

    Ok(())
}

async fn log_request(sdk: &Spyglass) -> spyglass::Result<()> {
    let log = RequestLog {
        model: "gpt-4".to_string(),
        prompt_messages: vec![
            Message {
                role: "system".to_string(),
                content: json!("You are a helpful assistant."),
                name: None,
            },
            Message {
                role: "user".to_string(),
                content: json!("What is the capital of France?"),
                name: None,
            },
        ],
        completion_message: Some(Message {
            role: "assistant".to_string(),
            content: json!("The capital of France is Paris."),
            name: None,
        }),
        prompt_tokens: Some(25),
        completion_tokens: Some(8),
        cost: Some(0.0033),
        customer_params: Some(CustomerParams {
            customer_identifier: "user-123".to_string(),
            metadata: json!({"session_id": "abc-123"})
                .as_object()
                .cloned()
                .unwrap_or_default(),
        }),
        usage: Some(Usage {
            prompt_tokens: 25,
            completion_tokens: 8,
            total_tokens: 33,
        }),
        ..RequestLog::default()
    };

    sdk.logs().create(&log).await?;
    println!("logged one request against {}", log.model);
    Ok(())
}

async fn list_models(sdk: &Spyglass) -> spyglass::Result<()> {
    let models = sdk.models().list().await?;
    for model in &models {
        println!(
            "{} ({}) - context window {} tokens",
            model.name, model.provider, model.context_window
        );
    }
    println!("{} models available", models.len());
    Ok(())
}

async fn manage_prompts(sdk: &Spyglass) -> spyglass::Result<()> {
    let prompt = sdk
        .prompts()
        .create("greeting", Some("A friendly greeting prompt"))
        .await?;
    println!("created prompt {} ({})", prompt.name, prompt.id);

    let renamed = sdk
        .prompts()
        .update(&prompt.id, &Patch::new().set("name", "welcome"))
        .await?;
    println!("renamed to {}", renamed.name);

    sdk.prompts().delete(&prompt.id).await?;
    println!("deleted {}", prompt.id);
    Ok(())
}
