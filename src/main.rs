use clap::Parser;
use finmate::config::{ChatsAction, Command};
use finmate::core::fraud::{EMERGENCY_CONTACTS, SECURITY_TIPS};
use finmate::domain::ports::ConversationStore;
use finmate::utils::{logger, validation::Validate};
use finmate::{
    calculate_emi, AppConfig, ChatService, ChatSession, CliConfig, ConversationBook,
    FinmateError, FraudHeuristicDetector, GeminiClient, Glossary, LoanInputs, LocalStorage,
    Result,
};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    let config = AppConfig::load_or_default(&args.config);
    let json_logs = args.log_json
        || config
            .as_ref()
            .map(AppConfig::json_logs)
            .unwrap_or(false);

    // 初始化日誌
    if json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting finmate");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if let Err(e) = run(args.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Emi {
            principal,
            rate,
            term,
            json,
        } => {
            let inputs = LoanInputs::parse(&principal, &rate, &term)?;
            let result = calculate_emi(&inputs);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Monthly EMI:    ${:.2}", result.periodic_payment);
                println!("Total Payment:  ${:.2}", result.total_payment);
                println!("Total Interest: ${:.2}", result.total_interest);
            }
        }
        Command::Scan { message } => {
            let detector = FraudHeuristicDetector::new(config.fraud_keywords());
            let matches = detector.matched_keywords(&message);
            if matches.is_empty() {
                println!("✅ No common scam phrases found.");
            } else {
                println!("⚠️  Possible fraud risk: {}", matches.join(", "));
                print_advisory();
            }
        }
        Command::Glossary { query } => {
            let glossary = Glossary::default();
            let query = query.unwrap_or_default();
            let terms = glossary.search(&query);
            if terms.is_empty() {
                println!("No terms found matching \"{}\"", query);
            }
            for item in terms {
                println!("{} [{}]\n  {}\n", item.term, item.category, item.definition);
            }
        }
        Command::Chat {
            message,
            new,
            chat_id,
        } => {
            let api_key = config.require_api_key()?;
            let client = GeminiClient::new(
                config.model.endpoint.clone(),
                config.model.name.clone(),
                api_key,
                config.timeout(),
            )?;
            let mut service = ChatService::new(
                client,
                FraudHeuristicDetector::new(config.fraud_keywords()),
            )
            .with_history_limit(config.chat.history_limit);
            if let Some(prompt) = &config.chat.system_prompt {
                service = service.with_system_prompt(prompt.clone());
            }

            let store = LocalStorage::new(config.chat.data_dir.clone());
            let mut session = ChatSession::open(service, store).await?;
            if new {
                session.book_mut().create_chat();
            } else if let Some(id) = chat_id {
                session.book_mut().select(&id)?;
            }

            let reply = session.send(&message).await?;
            println!("{}", reply.reply);
            if reply.fraud_alert {
                println!();
                println!("⚠️  Security Alert - Potential Fraud Risk Detected");
                println!("Your message contains keywords that are commonly associated with financial scams or fraud attempts.");
                print_advisory();
            }
        }
        Command::Chats { action } => {
            let store = LocalStorage::new(config.chat.data_dir.clone());
            let mut book = ConversationBook::from_conversations(store.load().await?);
            match action {
                ChatsAction::List => {
                    if book.conversations().is_empty() {
                        println!("No saved conversations.");
                    }
                    for chat in book.conversations() {
                        println!("{}  {} ({} messages)", chat.id, chat.title, chat.messages.len());
                    }
                }
                ChatsAction::Show { id } => {
                    let chat = book.get(&id)?;
                    println!("# {}\n", chat.title);
                    for message in &chat.messages {
                        println!("{}: {}\n", message.role.speaker(), message.content);
                    }
                }
                ChatsAction::Rename { id, title } => {
                    book.rename(&id, &title)?;
                    store.save(book.conversations()).await?;
                    println!("Renamed {} to \"{}\"", id, book.get(&id)?.title);
                }
                ChatsAction::Delete { id } => {
                    book.delete_chat(&id)?;
                    store.save(book.conversations()).await?;
                    println!("Deleted {}", id);
                }
                ChatsAction::Export { id, output } => {
                    let export = serde_json::to_string_pretty(&book.export(&id)?)?;
                    match output {
                        Some(path) => {
                            tokio::fs::write(&path, export)
                                .await
                                .map_err(FinmateError::IoError)?;
                            println!("📁 Exported to: {}", path);
                        }
                        None => println!("{}", export),
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_advisory() {
    println!("\nImportant Security Tips:");
    for tip in SECURITY_TIPS {
        println!("  • {}", tip);
    }
    println!("\nEmergency Contacts & Resources:");
    for contact in EMERGENCY_CONTACTS {
        println!("  {}\n    {}\n    {}", contact.name, contact.phone, contact.website);
    }
}
