//! Command handlers

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use stayfolio_auth::{decode, login_return_path, AdminAffordance, Route};
use stayfolio_client::{ClientConfig, FetchSlot, FetchState, Removal, StayfolioClient};
use stayfolio_types::{ApartmentDraft, ApartmentForm, ApartmentId};

use crate::render::{apartment_details, apartment_line};
use crate::{Command, FormArgs};

pub async fn run(command: Command) -> anyhow::Result<()> {
    let config = ClientConfig::from_env().context("failed to load configuration")?;
    let client = StayfolioClient::open(config).context("failed to open session")?;

    match command {
        Command::Login {
            email,
            password,
            from,
        } => login(&client, &email, &password, from.as_deref()).await,
        Command::Logout => logout(&client),
        Command::Whoami => {
            whoami(&client);
            Ok(())
        }
        Command::List => list(&client).await,
        Command::Show { id } => show(&client, &id).await,
        Command::Create { fields } => create(&client, fields).await,
        Command::Update { id, fields } => update(&client, &id, fields).await,
        Command::Delete { id, yes } => delete(&client, &id, yes).await,
        Command::Share { id } => {
            println!("{}", client.share_url(&parse_id(&id)?));
            Ok(())
        }
    }
}

async fn login(
    client: &StayfolioClient,
    email: &str,
    password: &str,
    from: Option<&str>,
) -> anyhow::Result<()> {
    client
        .apartments()
        .login(email, password)
        .await
        .context("login failed")?;

    println!("Logged in as {}", email.trim());
    println!("Continue at {}", login_return_path(from));
    Ok(())
}

fn logout(client: &StayfolioClient) -> anyhow::Result<()> {
    client.apartments().logout().context("failed to clear session")?;
    println!("Logged out");
    Ok(())
}

fn whoami(client: &StayfolioClient) {
    let Some(token) = client.store().read() else {
        println!("Not logged in");
        return;
    };

    let claims = decode(&token);
    let subject = claims
        .as_ref()
        .and_then(|c| c.subject())
        .unwrap_or("unknown user");
    println!("Logged in as {subject}");

    if let Some(claims) = &claims {
        if !claims.roles().is_empty() {
            let roles: Vec<&str> = claims.roles().iter().map(String::as_str).collect();
            println!("Roles: {}", roles.join(", "));
        }
    }

    println!("{}", affordance_hint(client.affordance()));
}

fn affordance_hint(affordance: AdminAffordance) -> &'static str {
    match affordance {
        AdminAffordance::Admin => "You can create, edit and delete apartments.",
        AdminAffordance::SignedInWithoutPermission => {
            "This account cannot manage apartments."
        }
        AdminAffordance::Anonymous => "Log in to manage apartments.",
    }
}

async fn list(client: &StayfolioClient) -> anyhow::Result<()> {
    let cache = client.list_cache();
    cache.reload().await.context("couldn't load apartments")?;

    if cache.is_empty() {
        println!("No apartments yet");
        return Ok(());
    }
    for apartment in cache.snapshot() {
        println!("{}", apartment_line(&apartment));
    }
    Ok(())
}

async fn show(client: &StayfolioClient, raw_id: &str) -> anyhow::Result<()> {
    let id = parse_id(raw_id)?;
    let slot = FetchSlot::new();
    let _controller = client.apartments().bind_details(&slot, id.clone());

    match slot.settled().await {
        Some(FetchState::Success(apartment)) => {
            print!("{}", apartment_details(&apartment));
            println!();
            println!("Share: {}", client.share_url(&apartment.id));
            println!("{}", affordance_hint(client.affordance()));
            Ok(())
        }
        Some(FetchState::NotFound) => bail!("apartment {id} not found"),
        Some(FetchState::Error(message)) => bail!("couldn't load apartment {id}: {message}"),
        Some(FetchState::Loading) | None => bail!("apartment {id} did not finish loading"),
    }
}

async fn create(client: &StayfolioClient, fields: FormArgs) -> anyhow::Result<()> {
    require_session(client, &Route::ApartmentCreate)?;

    let mut form = ApartmentForm::default();
    fields.apply(&mut form);
    let draft = ApartmentDraft::from_form(&form)?;

    let created = client
        .apartments()
        .create(&draft)
        .await
        .context("couldn't create apartment")?;

    println!("Created {}", created.id);
    println!("Share: {}", client.share_url(&created.id));
    Ok(())
}

async fn update(client: &StayfolioClient, raw_id: &str, fields: FormArgs) -> anyhow::Result<()> {
    let id = parse_id(raw_id)?;
    require_session(client, &Route::ApartmentEdit(id.clone()))?;

    let current = client
        .apartments()
        .get(&id)
        .await
        .with_context(|| format!("couldn't load apartment {id}"))?;

    let mut form = ApartmentForm::from(&current);
    fields.apply(&mut form);
    let draft = ApartmentDraft::from_form(&form)?;

    client
        .apartments()
        .update(&id, &draft)
        .await
        .with_context(|| format!("couldn't update apartment {id}"))?;

    println!("Updated {id}");
    Ok(())
}

async fn delete(client: &StayfolioClient, raw_id: &str, yes: bool) -> anyhow::Result<()> {
    let id = parse_id(raw_id)?;
    let cache = client.list_cache();

    let removal = cache
        .remove(&id, |id| yes || confirm(&format!("Delete apartment {id}?")))
        .await
        .with_context(|| format!("couldn't delete apartment {id}"))?;

    match removal {
        Removal::Declined => println!("Cancelled"),
        Removal::Deleted => println!("Deleted {id}"),
    }
    Ok(())
}

/// Refuse to enter a protected view without a session
fn require_session(client: &StayfolioClient, route: &Route) -> anyhow::Result<()> {
    if let Err(redirect) = client.guard().enter(route) {
        bail!(
            "login required: run `stayfolio login --from {}` first",
            redirect.from()
        );
    }
    Ok(())
}

fn parse_id(raw: &str) -> anyhow::Result<ApartmentId> {
    ApartmentId::parse(raw).with_context(|| format!("invalid apartment id {raw:?}"))
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl FormArgs {
    /// Overwrite the form fields that were given on the command line
    fn apply(self, form: &mut ApartmentForm) {
        let pairs = [
            (self.title, &mut form.title),
            (self.address, &mut form.address),
            (self.surface, &mut form.surface),
            (self.rooms, &mut form.rooms),
            (self.price_per_night, &mut form.price_per_night),
            (self.description, &mut form.description),
            (self.image_url, &mut form.image_url),
        ];
        for (value, field) in pairs {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}
