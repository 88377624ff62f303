//! Diesel table definitions. Must match `migrations/` exactly.

diesel::table! {
    /// Application users.
    users (id) {
        /// Serial primary key assigned on insert.
        id -> Int4,
        /// Login name, at most 64 characters.
        username -> Varchar,
        /// Email address, at most 254 characters.
        email -> Varchar,
        /// Password as supplied by the client.
        password -> Text,
        /// Insert timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp, refreshed by trigger.
        updated_at -> Timestamptz,
    }
}
