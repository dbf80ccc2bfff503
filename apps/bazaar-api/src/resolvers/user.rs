//! Profiles.

use tracing::info;

use bazaar_core::{User, UserUpdate};
use bazaar_store::MarketStore;

use super::Caller;
use crate::error::{ApiError, ApiResult};
use crate::views::ProfileView;

pub fn user(store: &MarketStore, id: &str) -> ApiResult<ProfileView> {
    let user = store
        .find_user(id)
        .ok_or_else(|| ApiError::bad_input("User not found"))?;

    Ok(ProfileView::build(store, user))
}

pub fn me(store: &MarketStore, caller: &Caller) -> ApiResult<ProfileView> {
    let user = caller.account(store)?;
    Ok(ProfileView::build(store, user))
}

/// Updates the caller's own profile; absent or blank fields are kept.
pub fn update_user(
    store: &mut MarketStore,
    caller: &Caller,
    name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
) -> ApiResult<User> {
    let user_id = caller.user_id()?;

    let user = store.update_user(user_id, &UserUpdate { name, phone, address })?;
    info!(id = %user.id, "Profile updated");

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::resolvers::test_support::{jane, john, seeded};

    #[test]
    fn test_user_profile() {
        let store = seeded();

        let profile = user(&store, "1").unwrap();
        assert_eq!(profile.user.email, "john@seller.com");
        assert_eq!(profile.products.len(), 4);

        assert_eq!(user(&store, "999").unwrap_err(), ApiError::bad_input("User not found"));
    }

    #[test]
    fn test_me() {
        let store = seeded();
        assert_eq!(me(&store, &jane()).unwrap().user.name, "Jane Smith");
        assert_eq!(
            me(&store, &Caller::anonymous()).unwrap_err().code,
            ErrorCode::Unauthenticated
        );
    }

    #[test]
    fn test_update_user_skips_blank_fields() {
        let mut store = seeded();

        let updated = update_user(
            &mut store,
            &john(),
            Some("Johnny".to_string()),
            Some("   ".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(updated.name, "Johnny");
        assert_eq!(updated.phone.as_deref(), Some("+1234567890"));
        assert_eq!(updated.address.as_deref(), Some("123 Main St, New York, NY"));
    }

    #[test]
    fn test_update_user_requires_auth() {
        let mut store = seeded();
        let err = update_user(&mut store, &Caller::anonymous(), None, None, None).unwrap_err();
        assert_eq!(err, ApiError::unauthenticated());
    }
}
