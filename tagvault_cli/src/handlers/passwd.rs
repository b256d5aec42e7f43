use tagvault::Store;
use crate::errors::CliError;

/// Sets or changes the password, prompting for whatever was not passed on the command line.
pub fn handle_passwd(store: &mut Store, current: Option<String>, new: Option<String>) -> Result<(), CliError> {
    let current = match current {
        Some(password) => Some(password),
        None if store.has_password() => Some(rpassword::prompt_password("Enter current password: ")?),
        None => None,
    };

    let new = match new {
        Some(password) => password,
        None => {
            let password = rpassword::prompt_password("Enter new password: ")?;
            let confirm = rpassword::prompt_password("Confirm new password: ")?;
            if password != confirm {
                return Err(CliError::PasswordMismatch);
            }
            password
        }
    };

    store.set_password(current.as_deref(), &new)?;
    println!("Password updated. Records move to the new key on the next save.");
    Ok(())
}
