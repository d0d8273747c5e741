diesel::table! {
    tasks (id) {
        id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
        due_date -> Date,
        priority -> Varchar,
        status -> Varchar,
        task_category -> Nullable<Varchar>,
        board_category -> Varchar,
        icon -> Nullable<Varchar>,
    }
}

diesel::table! {
    subtasks (id) {
        id -> Int4,
        task_id -> Int4,
        title -> Varchar,
        completed -> Bool,
    }
}

diesel::table! {
    contacts (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
        color -> Varchar,
    }
}

diesel::table! {
    task_assignments (id) {
        id -> Int4,
        task_id -> Int4,
        contact_id -> Int4,
    }
}

diesel::table! {
    boards (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    users (id) {
        id -> Int4,
        email -> Varchar,
        username -> Varchar,
        password_hash -> Varchar,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        is_staff -> Bool,
        is_superuser -> Bool,
        date_joined -> Timestamptz,
    }
}

diesel::table! {
    profiles (id) {
        id -> Int4,
        user_id -> Int4,
        bio -> Nullable<Text>,
        location -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    auth_tokens (id) {
        id -> Int4,
        user_id -> Int4,
        token -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(subtasks -> tasks (task_id));
diesel::joinable!(task_assignments -> tasks (task_id));
diesel::joinable!(task_assignments -> contacts (contact_id));
diesel::joinable!(profiles -> users (user_id));
diesel::joinable!(auth_tokens -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    auth_tokens,
    boards,
    contacts,
    profiles,
    subtasks,
    task_assignments,
    tasks,
    users,
);
