//! User profiles and their addresses.

use std::sync::Arc;
use std::time::Duration;

use validator::Validate;

use crate::domain::aggregates::{Address, AddressInput, AddressSlot, NewUser, User, MAX_ADDRESSES};
use crate::domain::value_objects::ObjectId;
use crate::error::{Result, ShopError};
use crate::services::bounded;
use crate::store::UserStore;

pub struct AccountService {
    users: Arc<dyn UserStore>,
    timeout: Duration,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, timeout: Duration) -> Self { Self { users, timeout } }

    /// Creates a profile with an empty cart, no addresses and no orders.
    pub async fn signup(&self, new: NewUser) -> Result<User> {
        new.validate()?;
        let user = User::create(new);
        bounded(self.timeout, self.users.insert_user(&user)).await?;
        tracing::info!(user_id = %user.id, "user signed up");
        Ok(user)
    }

    pub async fn add_address(&self, user_id: ObjectId, input: AddressInput) -> Result<Address> {
        input.validate()?;
        let address = Address::create(input);
        if !bounded(self.timeout, self.users.push_address(user_id, &address, MAX_ADDRESSES)).await? {
            return Err(ShopError::AddressLimit(MAX_ADDRESSES));
        }
        tracing::info!(%user_id, address_id = %address.address_id, "address added");
        Ok(address)
    }

    pub async fn edit_address(&self, user_id: ObjectId, slot: AddressSlot, input: AddressInput) -> Result<()> {
        input.validate()?;
        if !bounded(self.timeout, self.users.update_address(user_id, slot, input)).await? {
            return Err(ShopError::NotFound(format!("{} address", slot.label())));
        }
        tracing::info!(%user_id, slot = slot.label(), "address updated");
        Ok(())
    }

    pub async fn delete_addresses(&self, user_id: ObjectId) -> Result<()> {
        bounded(self.timeout, self.users.clear_addresses(user_id)).await?;
        tracing::info!(%user_id, "addresses deleted");
        Ok(())
    }
}
