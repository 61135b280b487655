pub use crate::cli::{command, run_app};
pub use crate::config::Config;
pub use crate::domain::{
    contact::{self, Contact, ContactId, PhoneRule},
    form::{FormController, FormMode},
    id::{IdAllocator, IdPolicy},
    manager::ContactStore,
    view::{ContactCard, FormView, contact_cards},
};
pub use crate::errors::{AppError, PersistenceError};
pub use crate::storage::{
    self, KeyValueStorage, PersistenceAdapter, STORAGE_KEY, StorageMedium, file::FileStorage,
    memory::MemStorage, parse_storage,
};
pub use uuid;
