use super::contact::Contact;

/// Display record for one contact in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCard {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub href: String,
}

impl ContactCard {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            href: format!("tel:+1{}", contact.phone),
        }
    }
}

pub fn contact_cards(contacts: &[Contact]) -> Vec<ContactCard> {
    contacts.iter().map(ContactCard::from_contact).collect()
}

/// What the contact form shows in its current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub name: String,
    pub phone: String,
}

pub fn display_card(card: &ContactCard, position: usize) -> String {
    format!(
        "{position:>3}. {:<38} {:<50} {:<12} {}",
        card.id, card.name, card.phone, card.href
    )
}
