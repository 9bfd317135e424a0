//! Domain extensions shared by the behavioural tests.
//!
//! `UserMock` and `ProductMock` cover disjoint sections. `AccountMock`
//! deliberately reuses the `with_user` name so merge tests can observe
//! last-write-wins.

use mockli::{MockKey, Partial, mock_extension};
use serde_json::json;

mock_extension! {
    /// Users keyed by `id`.
    pub struct UserMock {
        fn with_user => "users" keyed "id";
    }
}

mock_extension! {
    /// Products keyed by `id`, named after their key unless overridden.
    pub struct ProductMock {
        fn with_product => "products" keyed "id",
            defaults |key: &MockKey| Partial::from(json!({"name": format!("Product {key}")}));
    }
}

mock_extension! {
    /// Accounts keyed by `login`, exposed under the colliding `with_user`
    /// name, plus sessions.
    pub struct AccountMock {
        fn with_user => "accounts" keyed "login";
        fn with_session => "sessions" keyed "token";
    }
}
