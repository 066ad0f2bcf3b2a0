// src/main.rs
//
// Calculatrice scientifique — point d’entrée ligne de commande
// ------------------------------------------------------------
// - Une expression en argument : évaluée une fois.
// - Sans argument : une expression par ligne sur l’entrée standard.
// - Configuration : défauts < fichier TOML (--config) < options (--angle, --precision).
// - Journal : RUST_LOG (ex: RUST_LOG=debug), sur stderr, "warn" par défaut.
//
// Code de sortie 1 si au moins une évaluation échoue.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use calculatrice_sci::noyau::lexique::lexique;
use calculatrice_sci::noyau::{eval_detaille, ConfigEval, UniteAngle};

const UNITE_DEFAUT: UniteAngle = UniteAngle::Radians;
const PRECISION_DEFAUT: u32 = 10;

/// Calculatrice scientifique : évalue des expressions infixes
/// (sin, ln, sqrt, factorielle, complexes…).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Unité d’angle des fonctions trigonométriques.
    #[arg(short, long, value_enum)]
    angle: Option<UniteAngle>,

    /// Chiffres significatifs du résultat (6 à 20).
    #[arg(short, long)]
    precision: Option<u32>,

    /// Fichier TOML (`unite_angle`, `precision`).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Affiche aussi les jetons et la RPN.
    #[arg(short, long)]
    demarche: bool,

    /// Liste les fonctions reconnues, puis quitte.
    #[arg(long)]
    fonctions: bool,

    /// Expression (lue sur l’entrée standard si absente).
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,
}

fn main() -> ExitCode {
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();

    match lancer(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("erreur : {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Retourne Ok(false) si une expression a échoué.
fn lancer(args: Args) -> Result<bool> {
    if args.fonctions {
        println!("{}", lexique().noms_fonctions().join(" "));
        return Ok(true);
    }

    let config = configuration(&args)?;
    debug!(?config, "configuration");

    if !args.expression.is_empty() {
        let expr = args.expression.join(" ");
        return Ok(evaluer(&expr, config, args.demarche));
    }

    let mut tout_ok = true;
    for ligne in io::stdin().lock().lines() {
        let ligne = ligne.context("lecture de l’entrée standard")?;
        if ligne.trim().is_empty() {
            continue;
        }
        tout_ok &= evaluer(&ligne, config, args.demarche);
    }
    Ok(tout_ok)
}

fn configuration(args: &Args) -> Result<ConfigEval> {
    let (unite, precision) = match &args.config {
        Some(chemin) => {
            let c = lire_fichier(chemin)?;
            (c.unite(), c.precision() as u32)
        }
        None => (UNITE_DEFAUT, PRECISION_DEFAUT),
    };
    let config = ConfigEval::new(
        args.angle.unwrap_or(unite),
        args.precision.unwrap_or(precision),
    )?;
    Ok(config)
}

fn lire_fichier(chemin: &Path) -> Result<ConfigEval> {
    let texte = std::fs::read_to_string(chemin)
        .with_context(|| format!("lecture de {}", chemin.display()))?;
    toml::from_str(&texte)
        .with_context(|| format!("configuration invalide : {}", chemin.display()))
}

/* ------------------------ Une expression ------------------------ */

fn evaluer(expr: &str, config: ConfigEval, demarche: bool) -> bool {
    match eval_detaille(expr, config) {
        Ok(d) => {
            if demarche {
                println!("jetons : {}", d.jetons);
                println!("RPN    : {}", d.rpn);
            }
            println!("{}", d.valeur.formater(config.precision()));
            true
        }
        Err(e) => {
            eprintln!("[{}] {e}", e.etape());
            if let Some(pos) = e.position() {
                eprintln!("  {expr}");
                eprintln!("  {}^", " ".repeat(pos));
            }
            false
        }
    }
}
