//! Terminal client: sign in, show the dashboard, then chat with the tutor.
//!
//! `MASOMO_URL` (default `http://localhost:8080`), `MASOMO_EMAIL` and
//! `MASOMO_PASSWORD` may be set to skip the prompts.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use masomohub::client::ApiClient;
use masomohub::ui::chat::{ChatWidget, Role};
use masomohub::ui::dashboard::DashboardScreen;
use masomohub::ui::login::{LoginForm, LoginState};

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> anyhow::Result<String> {
    let mut out = tokio::io::stdout();
    out.write_all(label.as_bytes()).await?;
    out.flush().await?;
    Ok(lines.next_line().await?.unwrap_or_default())
}

fn print_dashboard(screen: &DashboardScreen) {
    match screen {
        DashboardScreen::Loading => println!("Loading Masomohub..."),
        DashboardScreen::Unavailable => println!("Dashboard is unavailable right now."),
        DashboardScreen::Empty | DashboardScreen::Loaded(_) => {
            println!("Good Morning, {}! Keep up the great work!", screen.greeting_name());
            let cards = screen.cards();
            if cards.is_empty() {
                println!("  No courses in progress.");
            }
            for card in cards {
                println!("  {} {:<12} {} ({}%)", card.glyph, card.units, card.title, card.progress);
            }
            if let DashboardScreen::Loaded(view) = screen {
                if !view.continue_learning.is_empty() {
                    println!("Continue Learning:");
                    for item in &view.continue_learning {
                        println!("  [{}] {} with {}", item.category, item.title, item.mentor_name);
                    }
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    masomohub::init_tracing("masomo=info,masomohub=warn");

    let base_url = std::env::var("MASOMO_URL").unwrap_or_else(|_| "http://localhost:8080".into());
    let mut client = ApiClient::new(&base_url).context("build client")?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut form = LoginForm::default();
    let (title, subtitle) = form.heading();
    println!("{}\n{}", title, subtitle);
    form.email = match std::env::var("MASOMO_EMAIL") {
        Ok(v) => v,
        Err(_) => prompt(&mut lines, "Email: ").await?,
    };
    form.password = match std::env::var("MASOMO_PASSWORD") {
        Ok(v) => v,
        Err(_) => prompt(&mut lines, "Password: ").await?,
    };

    if let Some(req) = form.submit() {
        let outcome = client.login(&req).await;
        if let Err(e) = &outcome {
            tracing::debug!(error = %e, "login failed");
        }
        form.resolve(outcome);
    }
    if let LoginState::ErrorShown(msg) = form.state() {
        eprintln!("{}", msg);
        std::process::exit(1);
    }

    let mut screen = DashboardScreen::default();
    let outcome = client.dashboard().await;
    if let Err(e) = &outcome {
        tracing::warn!(error = %e, "dashboard load failed");
    }
    screen.resolve(outcome);
    print_dashboard(&screen);

    let mut chat = ChatWidget::default();
    chat.open();
    println!("\nMasomohub Tutor. Ask me anything about your courses! (/quit to leave)");
    while chat.is_open() {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" {
            chat.close();
            continue;
        }
        chat.set_draft(line);
        let Some(message) = chat.submit() else {
            continue;
        };
        println!("Typing...");
        chat.receive(client.chat(&message).await);
        if let Some(entry) = chat.transcript().last().filter(|e| e.role == Role::Assistant) {
            println!("Tutor: {}", entry.text);
        }
    }

    Ok(())
}
