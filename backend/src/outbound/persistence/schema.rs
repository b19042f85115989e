//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes a table, update the matching block here (or regenerate
//! it with `diesel print-schema` against a migrated database).

diesel::table! {
    /// Tenants. `hostel_number` is unique and stored upper-case.
    hostels (id) {
        id -> Uuid,
        name -> Varchar,
        hostel_number -> Varchar,
        address -> Varchar,
        contact_email -> Varchar,
        contact_phone -> Varchar,
        room_limit -> Int4,
        student_limit -> Int4,
        /// Last day on which the hostel's users may sign in.
        expires_on -> Date,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Login accounts for every role.
    accounts (id) {
        id -> Uuid,
        /// Unique, stored lower-case.
        email -> Varchar,
        password_hash -> Varchar,
        role -> Varchar,
        /// Null only for super-admins.
        hostel_id -> Nullable<Uuid>,
        /// Id of the admin or student row this account signs in as.
        profile_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    admins (id) {
        id -> Uuid,
        hostel_id -> Uuid,
        full_name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
    }
}

diesel::table! {
    /// Rooms. Numbers are unique per hostel on `lower(room_number)`.
    rooms (id) {
        id -> Uuid,
        hostel_id -> Uuid,
        room_number -> Varchar,
        /// Bed count kept as text and parsed on read.
        capacity -> Varchar,
        floor -> Int4,
        room_type -> Varchar,
        /// Nightly price in minor currency units.
        price -> Int8,
    }
}

diesel::table! {
    students (id) {
        id -> Uuid,
        hostel_id -> Uuid,
        room_id -> Nullable<Uuid>,
        full_name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
        guardian_name -> Varchar,
        guardian_phone -> Varchar,
        enrolled_on -> Date,
    }
}

diesel::table! {
    guests (id) {
        id -> Uuid,
        hostel_id -> Uuid,
        room_id -> Uuid,
        full_name -> Varchar,
        phone -> Varchar,
        purpose -> Varchar,
        check_in -> Date,
        check_out -> Date,
    }
}

diesel::table! {
    inventory_items (id) {
        id -> Uuid,
        hostel_id -> Uuid,
        name -> Varchar,
        category -> Varchar,
        quantity -> Int4,
        condition -> Varchar,
    }
}

diesel::table! {
    /// One row per hostel and weekday.
    meal_plans (hostel_id, weekday) {
        hostel_id -> Uuid,
        weekday -> Varchar,
        breakfast -> Varchar,
        lunch -> Varchar,
        dinner -> Varchar,
    }
}

diesel::table! {
    announcements (id) {
        id -> Uuid,
        hostel_id -> Uuid,
        title -> Varchar,
        body -> Text,
        audience -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    finance_records (id) {
        id -> Uuid,
        hostel_id -> Uuid,
        kind -> Varchar,
        category -> Varchar,
        amount -> Int8,
        description -> Nullable<Varchar>,
        recorded_on -> Date,
    }
}

diesel::table! {
    /// Singleton row keyed by `id = 1`.
    system_settings (id) {
        id -> Int2,
        platform_name -> Varchar,
        support_email -> Varchar,
        default_validity_days -> Int4,
        maintenance_mode -> Bool,
    }
}

diesel::joinable!(accounts -> hostels (hostel_id));
diesel::joinable!(admins -> hostels (hostel_id));
diesel::joinable!(rooms -> hostels (hostel_id));
diesel::joinable!(students -> hostels (hostel_id));
diesel::joinable!(students -> rooms (room_id));
diesel::joinable!(guests -> rooms (room_id));
diesel::joinable!(inventory_items -> hostels (hostel_id));
diesel::joinable!(meal_plans -> hostels (hostel_id));
diesel::joinable!(announcements -> hostels (hostel_id));
diesel::joinable!(finance_records -> hostels (hostel_id));

diesel::allow_tables_to_appear_in_same_query!(
    accounts,
    admins,
    announcements,
    finance_records,
    guests,
    hostels,
    inventory_items,
    meal_plans,
    rooms,
    students,
    system_settings,
);
