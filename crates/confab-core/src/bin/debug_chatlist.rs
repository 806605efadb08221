use anyhow::Result;

use confab_core::{ChatEvent, ChatRuntime, ConversationSummary, CoreConfig};

fn conversation(
    id: &str,
    name: &str,
    last_message: &str,
    timestamp: &str,
    unread: u32,
) -> ConversationSummary {
    ConversationSummary {
        id: id.to_string(),
        name: name.to_string(),
        avatar: None,
        online: false,
        last_message: last_message.to_string(),
        timestamp: timestamp.to_string(),
        unread,
    }
}

fn print_list(runtime: &ChatRuntime, query: &str) {
    let store = runtime.store();
    let store = store.borrow();
    let rows = store.visible_conversations(query);
    if query.is_empty() {
        println!("{} conversations:", rows.len());
    } else {
        println!("{} conversations matching '{}':", rows.len(), query);
    }
    for row in &rows {
        let marker = if row.is_selected { ">" } else { " " };
        let online = if row.summary.online { "*" } else { " " };
        let typing = if row.is_typing { "  [typing...]" } else { "" };
        println!(
            "{}{} {:<16} {:>2} unread  {}  {}{}",
            marker, online, row.summary.name, row.summary.unread, row.summary.timestamp,
            row.summary.last_message, typing
        );
    }
    println!(
        "  shows_chat_list: {}  selected: {:?}",
        store.visibility().shows_chat_list(),
        store.selection().current_selection()
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // CONFAB_MOBILE=1 simulates the single-pane layout
    let config = CoreConfig {
        mobile_mode: std::env::var("CONFAB_MOBILE").is_ok(),
        ..Default::default()
    };
    println!("mobile_mode: {}", config.mobile_mode);

    let mut runtime = ChatRuntime::new(config);
    runtime.subscribe(|changes| {
        for change in changes {
            eprintln!("  change: {:?}", change);
        }
    });
    let handle = runtime.handle();
    let now = chrono::Local::now().format("%H:%M").to_string();

    println!("\n=== Loading snapshot ===");
    handle.send(ChatEvent::ConversationsLoaded {
        conversations: vec![
            conversation("c1", "Alice Johnson", "See you tomorrow!", &now, 0),
            conversation("c2", "Bob Martin", "Can you review my PR?", &now, 2),
            conversation("c3", "Design team", "New mockups are up", &now, 5),
        ],
    })?;
    runtime.process_pending();
    print_list(&runtime, "");

    println!("\n=== Typing signals for Bob ===");
    for (participant, is_typing) in [("bob", true), ("mia", true), ("bob", false)] {
        handle.send(ChatEvent::TypingSignal {
            conversation_id: "c2".to_string(),
            participant_id: participant.to_string(),
            is_typing,
        })?;
    }
    runtime.process_pending();
    print_list(&runtime, "");

    println!("\n=== Message arrives for Design team ===");
    handle.send(ChatEvent::MessageReceived {
        conversation_id: "c3".to_string(),
        preview: "Uploaded v2 with the dark palette".to_string(),
        timestamp: now.clone(),
    })?;
    runtime.process_pending();
    print_list(&runtime, "");

    println!("\n=== Opening Bob ===");
    handle.send(ChatEvent::ConversationOpened {
        conversation_id: "c2".to_string(),
    })?;
    runtime.process_pending();
    print_list(&runtime, "");

    println!("\n=== Filter 'bo' ===");
    print_list(&runtime, "bo");

    println!("\n=== Design team goes online, then is removed ===");
    handle.send(ChatEvent::PresenceChanged {
        conversation_id: "c3".to_string(),
        online: true,
    })?;
    handle.send(ChatEvent::ConversationRemoved {
        conversation_id: "c3".to_string(),
    })?;
    // A straggler event for the removed conversation; dropped with a debug log
    handle.send(ChatEvent::MessageReceived {
        conversation_id: "c3".to_string(),
        preview: "anyone here?".to_string(),
        timestamp: now,
    })?;
    runtime.process_pending();
    print_list(&runtime, "");

    println!("\n=== Done ===");
    Ok(())
}
