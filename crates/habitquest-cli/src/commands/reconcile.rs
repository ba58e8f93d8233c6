//! Explicit title reconciliation pass.

use habitquest_core::Reconciliation;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = super::load_session().await?;
    // load() already reconciles once; this reports the steady state.
    match session.reconcile().await {
        Reconciliation::AlreadyConsistent => {
            println!("Stored title matches the XP-derived tier.");
        }
        Reconciliation::Corrected { previous, current } => {
            println!(
                "Corrected title: {} -> {}",
                previous.as_deref().unwrap_or("(none)"),
                current
            );
        }
    }
    Ok(())
}
