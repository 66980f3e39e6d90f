//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Target distributions a package can be reviewed for.
    distributions (id) {
        id -> Int4,
        #[max_length = 255]
        name -> Varchar,
    }
}

diesel::table! {
    /// Packages submitted for review. `name` is unique.
    packages (id) {
        id -> Int4,
        #[max_length = 255]
        name -> Varchar,
        #[max_length = 255]
        summary -> Varchar,
        description -> Text,
        /// Username of the submitter.
        #[max_length = 64]
        owner -> Varchar,
        submitted -> Timestamptz,
        /// False once the package is retired.
        active -> Bool,
    }
}

diesel::table! {
    /// Many-to-many link between packages and distributions.
    package_distributions (package_id, distribution_id) {
        package_id -> Int4,
        distribution_id -> Int4,
    }
}

diesel::table! {
    /// Review rounds of a package.
    reviews (id) {
        id -> Int4,
        package_id -> Int4,
        #[max_length = 255]
        commit_id -> Nullable<Varchar>,
        date_start -> Timestamptz,
        date_end -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Users assigned to a review.
    reviewers (review_id, reviewer_name) {
        review_id -> Int4,
        #[max_length = 64]
        reviewer_name -> Varchar,
    }
}

diesel::table! {
    comments (id) {
        id -> Int4,
        review_id -> Int4,
        #[max_length = 64]
        author -> Varchar,
        body -> Text,
        date -> Timestamptz,
    }
}

diesel::joinable!(package_distributions -> packages (package_id));
diesel::joinable!(package_distributions -> distributions (distribution_id));
diesel::joinable!(reviews -> packages (package_id));
diesel::joinable!(reviewers -> reviews (review_id));
diesel::joinable!(comments -> reviews (review_id));

diesel::allow_tables_to_appear_in_same_query!(
    comments,
    distributions,
    package_distributions,
    packages,
    reviewers,
    reviews,
);
