//! List local models and stream one chat completion.
//!
//! Make sure Ollama is running locally and run:
//!   cargo run --example basic

use ferry_ollama::Ollama;
use futures::StreamExt;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Ollama::new();

    let models = client.list_models().await?;
    println!("Local models:");
    for model in &models {
        println!("  {}", model["name"].as_str().unwrap_or("<unnamed>"));
    }

    let payload = json!({
        "model": "llama3.2",
        "messages": [{"role": "user", "content": "Say hello in one sentence."}],
        "stream": true,
    });

    let mut stream = client.chat(payload, "llama3.2", "Say hello in one sentence.").await?;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if let Some(text) = chunk["message"]["content"].as_str() {
            print!("{text}");
        }
    }
    println!();

    Ok(())
}
