use anyhow::{bail, Context, Result};
use colored::*;
use reqwest::Client;
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🧗 ClimbHelp Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = std::env::var("GATEWAY_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let client = Client::new();

    // Paso 1: Pedir credenciales y abrir sesión
    let email = prompt("Email: ")?;
    let password = prompt("Password: ")?;
    let token = login(&client, &base_url, &email, &password).await?;

    // Paso 2: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🏢 Listar salles");
        println!("2. 🔍 Catálogo filtrado de una salle");
        println!("3. 👤 Perfil");
        println!("4. 🚪 Salir");
        let choice = prompt("Selecciona una opción (1-4): ")?;

        let result = match choice.as_str() {
            "1" => list_salles(&client, &base_url).await,
            "2" => catalog(&client, &base_url).await,
            "3" => profile(&client, &base_url, &token).await,
            "4" => {
                logout(&client, &base_url, &token).await;
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("{} {:#}", "❌ Error:".bright_red(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

/// Lee el envoltorio `{success, data, message}` del gateway
async fn read(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let body: Value = response.json().await.context("Respuesta no JSON")?;
    if !status.is_success() {
        bail!("{} {}", status, body["message"].as_str().unwrap_or("sin mensaje"));
    }
    Ok(body["data"].clone())
}

async fn login(client: &Client, base_url: &str, email: &str, password: &str) -> Result<String> {
    println!();
    println!("{}", "🔐 AUTENTICANDO...".bright_cyan().bold());

    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .with_context(|| format!("Gateway injoignable en {}", base_url))?;
    let data = read(response).await?;

    let token = data["token"].as_str().context("Respuesta sin token")?.to_string();
    println!(
        "{} {}",
        "✅ Sesión abierta para".bright_green(),
        data["user"]["username"].as_str().unwrap_or("?").bold()
    );
    Ok(token)
}

async fn logout(client: &Client, base_url: &str, token: &str) {
    if let Err(e) = client
        .post(format!("{}/api/auth/logout", base_url))
        .bearer_auth(token)
        .send()
        .await
    {
        println!("{} {}", "⚠️ Logout fallido:".bright_yellow(), e);
    }
}

async fn list_salles(client: &Client, base_url: &str) -> Result<()> {
    let q = prompt("Buscar (vacío = todas): ")?;
    let response = client
        .get(format!("{}/api/salles", base_url))
        .query(&[("q", q)])
        .send()
        .await?;
    let salles = read(response).await?;

    for salle in salles.as_array().into_iter().flatten() {
        println!(
            "  {} {} ({} voies)",
            format!("#{}", salle["id"]).bright_blue(),
            salle["nom"].as_str().unwrap_or("?").bold(),
            salle["nombre_voies"]
        );
    }
    Ok(())
}

async fn catalog(client: &Client, base_url: &str) -> Result<()> {
    let salle_id = prompt("Id de la salle: ")?;
    let cotation = prompt("Cotation (ej: 6a - 6c, vacío = todas): ")?;
    let tri = prompt("Tri (nom, cotation, difficulte, date): ")?;
    let ordre = prompt("Orden (asc, desc): ")?;
    let ouvreurs = prompt("Ouvreurs separados por comas: ")?;

    let url = format!(
        "{}/api/salles/{}/voies?cotation={}&tri={}&ordre={}&ouvreurs={}",
        base_url,
        urlencoding::encode(&salle_id),
        urlencoding::encode(&cotation),
        urlencoding::encode(&tri),
        urlencoding::encode(&ordre),
        urlencoding::encode(&ouvreurs)
    );
    let view = read(client.get(url).send().await?).await?;

    println!();
    println!(
        "{} {} ({}/{})",
        "🧗".bright_blue(),
        view["salle_nom"].as_str().unwrap_or("Salle").bold(),
        view["count"],
        view["total"]
    );

    if let Some(empty) = view.get("empty_state").filter(|e| !e.is_null()) {
        println!("{}", empty["title"].as_str().unwrap_or("").bright_yellow());
        println!("{}", empty["message"].as_str().unwrap_or(""));
        return Ok(());
    }

    for voie in view["voies"].as_array().into_iter().flatten() {
        let badge = voie["badge"]["icon"].as_str().unwrap_or(" ");
        println!(
            "  {} {:<6} {:<30} {}",
            badge,
            voie["cotation"].as_str().unwrap_or("-").bright_magenta(),
            voie["display_name"].as_str().unwrap_or("?"),
            voie["ouvreur"].as_str().unwrap_or("").dimmed()
        );
    }
    Ok(())
}

async fn profile(client: &Client, base_url: &str, token: &str) -> Result<()> {
    let response = client
        .get(format!("{}/api/profile", base_url))
        .bearer_auth(token)
        .send()
        .await?;
    let profile = read(response).await?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
