//! Vouch CLI tool
//!
//! A command-line host for the verification registry. The registry lives
//! in a JSON snapshot file; each invocation loads it, applies one call
//! with the caller identity supplied on the command line, and writes the
//! snapshot back on success.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use vouch::{Principal, Registry};

/// Vouch: access-controlled verification registry
#[derive(Parser)]
#[command(name = "vouch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the registry snapshot (default: ~/.vouch/registry.json)
    #[arg(short, long)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new registry with an initial admin
    Init {
        /// Principal to install as the initial admin
        admin: String,

        /// Force overwrite an existing registry
        #[arg(short, long)]
        force: bool,
    },

    /// Grant verified status to a principal
    Verify {
        /// Principal to verify
        target: String,

        /// Identity attributed to this call
        #[arg(short, long)]
        caller: String,
    },

    /// Revoke verified status from a principal
    Revoke {
        /// Principal to revoke
        target: String,

        /// Identity attributed to this call
        #[arg(short, long)]
        caller: String,
    },

    /// Check whether a principal is verified (public read)
    IsVerified {
        /// Principal to look up
        target: String,
    },

    /// Hand administrative privilege to another principal
    TransferAdmin {
        /// Principal receiving adminship
        new_admin: String,

        /// Identity attributed to this call
        #[arg(short, long)]
        caller: String,
    },

    /// Print the current admin and the verified set
    Show,
}

fn main() {
    let cli = Cli::parse();

    let registry_path = cli.registry.unwrap_or_else(default_registry_path);

    match cli.command {
        Commands::Init { admin, force } => cmd_init(&registry_path, &admin, force),
        Commands::Verify { target, caller } => cmd_verify(&registry_path, &caller, &target),
        Commands::Revoke { target, caller } => cmd_revoke(&registry_path, &caller, &target),
        Commands::IsVerified { target } => cmd_is_verified(&registry_path, &target),
        Commands::TransferAdmin { new_admin, caller } => {
            cmd_transfer_admin(&registry_path, &caller, &new_admin)
        }
        Commands::Show => cmd_show(&registry_path),
    }
}

fn default_registry_path() -> PathBuf {
    dirs::home_dir()
        .expect("Could not find home directory")
        .join(".vouch")
        .join("registry.json")
}

fn load_registry(path: &Path) -> Registry {
    let json = fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!("Error: No registry found at {:?}", path);
        eprintln!("Run 'vouch init <admin>' to create one.");
        std::process::exit(1);
    });

    serde_json::from_str(&json).unwrap_or_else(|e| {
        eprintln!("Error: Invalid registry file: {}", e);
        std::process::exit(1);
    })
}

fn save_registry(registry: &Registry, path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap_or_else(|e| {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        });
    }

    let json = serde_json::to_string_pretty(registry).unwrap_or_else(|e| {
        eprintln!("Error encoding registry: {}", e);
        std::process::exit(1);
    });

    fs::write(path, json).unwrap_or_else(|e| {
        eprintln!("Error saving registry: {}", e);
        std::process::exit(1);
    });
}

/// Report a failed call and exit without touching the snapshot
fn fail(err: vouch::RegistryError) -> ! {
    eprintln!("err {}: {}", err.code(), err);
    std::process::exit(1);
}

fn cmd_init(path: &Path, admin: &str, force: bool) {
    if path.exists() && !force {
        eprintln!("Registry already exists at {:?}", path);
        eprintln!("Use --force to overwrite.");
        std::process::exit(1);
    }

    let registry = Registry::new(Principal::new(admin));
    save_registry(&registry, path);

    println!("Registry created successfully!");
    println!();
    println!("Admin: {}", admin);
    println!("Registry saved to: {:?}", path);
}

fn cmd_verify(path: &Path, caller: &str, target: &str) {
    let mut registry = load_registry(path);

    match registry.verify(&Principal::new(caller), Principal::new(target)) {
        Ok(()) => {
            save_registry(&registry, path);
            println!("ok: {} is now verified", target);
        }
        Err(e) => fail(e),
    }
}

fn cmd_revoke(path: &Path, caller: &str, target: &str) {
    let mut registry = load_registry(path);

    match registry.revoke(&Principal::new(caller), &Principal::new(target)) {
        Ok(()) => {
            save_registry(&registry, path);
            println!("ok: {} is no longer verified", target);
        }
        Err(e) => fail(e),
    }
}

fn cmd_is_verified(path: &Path, target: &str) {
    let registry = load_registry(path);

    if registry.is_verified(&Principal::new(target)) {
        println!("{}: verified", target);
    } else {
        println!("{}: not verified", target);
    }
}

fn cmd_transfer_admin(path: &Path, caller: &str, new_admin: &str) {
    let mut registry = load_registry(path);

    match registry.transfer_admin(&Principal::new(caller), Principal::new(new_admin)) {
        Ok(()) => {
            save_registry(&registry, path);
            println!("ok: admin is now {}", new_admin);
        }
        Err(e) => fail(e),
    }
}

fn cmd_show(path: &Path) {
    let registry = load_registry(path);

    println!("Admin: {}", registry.admin());
    println!("Verified principals: {}", registry.verified_count());
    for principal in registry.verified() {
        println!("  {}", principal);
    }
}
