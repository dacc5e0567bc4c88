use std::error::Error;
use std::io::{self, Write};

use defensio_rs::{Comment, Defensio, TestForce, VERSION};
use tokio::runtime::Runtime;

fn prompt(label: &str) -> io::Result<String> {
    print!("{} ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn parse_bool(input: &str, default: bool) -> bool {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => true,
        "n" | "no" | "false" => false,
        _ => default,
    }
}

#[test]
#[ignore = "Requires network access and a Defensio API key"]
fn interactive_full_stack() -> Result<(), Box<dyn Error>> {
    println!("defensio-rs {} interactive smoke test", VERSION);
    println!("Provide inputs when prompted. Press Enter to accept defaults.\n");

    let api_key = prompt("API key:")?;
    let owner_input = prompt("Owner URL [http://example.com]:")?;
    let owner_url = if owner_input.is_empty() {
        "http://example.com".to_string()
    } else {
        owner_input
    };
    let advanced_answer = prompt("Use the advanced service tier? (y/N):")?;

    let client = Defensio::builder(api_key, owner_url)
        .advanced_mode(parse_bool(&advanced_answer, false))
        .build()?;
    let runtime = Runtime::new()?;

    println!("\nValidating API key...");
    if !runtime.block_on(client.valid_key())? {
        println!("The service rejected the key; aborting.");
        return Ok(());
    }
    println!("Key accepted.");

    println!("Auditing a forced-spam test comment...");
    let result = runtime.block_on(
        client.audit_comment(
            Comment::new()
                .with_user_ip("127.0.0.1")
                .with_article_date(chrono::Utc::now())
                .with_author("defensio-rs smoke test")
                .with_comment_type("comment")
                .with_content("Interactive transport check")
                .with_test_force(TestForce::Spam(0.75)),
        ),
    )?;
    println!("signature: {}", result.signature());
    println!(
        "spam: {} (spaminess {:.4})",
        result.is_spam(),
        result.spaminess()
    );

    println!("Reporting the audit back as a false positive...");
    let response = runtime.block_on(client.report_false_positives(&result))?;
    println!("Report acknowledged with {} field(s).", response.len());

    println!("Interactive test complete. Re-run with different inputs as needed.");
    Ok(())
}
