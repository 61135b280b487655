use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rusty-contacts", version, about = "Simple Contact Book")]
pub struct Cli {
    /// Storage medium (file, mem); overrides CONTACTS_STORAGE
    #[arg(long)]
    pub storage: Option<String>,

    /// Directory holding contacts.json; overrides CONTACTS_DIR
    #[arg(long)]
    pub storage_dir: Option<String>,

    /// Id policy for new contacts (sequential, uuid); overrides CONTACTS_ID_POLICY
    #[arg(long)]
    pub id_policy: Option<String>,

    /// Phone validation (ten-digits, any); overrides CONTACTS_PHONE_RULE
    #[arg(long)]
    pub phone_rule: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    Add {
        /// Contact name
        #[arg(long)]
        name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,
    },
    /// List contacts
    List,
    /// Update an existing contact by id
    /// Omitted fields keep their current value
    Update {
        /// Id shown by `list`
        #[arg(long)]
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Remove a contact by id
    Remove {
        /// Id shown by `list`
        #[arg(long)]
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Forget every stored contact; the next run starts from the sample contact
    Reset,
}
