use anyhow::Result;
use dhconsole_infrastructure::SecretStorage;

pub fn set_key(key: &str) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Admin key must not be empty");
    }

    let storage = SecretStorage::new()?;
    storage.save_admin_key(key)?;
    println!("Admin key saved to {}", storage.path().display());
    Ok(())
}
