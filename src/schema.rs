diesel::table! {
    accounts (id) {
        id -> Text,
        user_id -> Text,
        name -> Text,
        account_type -> Text,
        balance -> Text,
        currency -> Text,
        include_in_total -> Bool,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    transactions (id) {
        id -> Text,
        user_id -> Text,
        account_id -> Text,
        transaction_type -> Text,
        amount -> Text,
        category -> Text,
        description -> Nullable<Text>,
        date -> Date,
        is_recurring -> Bool,
        recurring_frequency -> Nullable<Text>,
        recurring_next_date -> Nullable<Date>,
        recurring_end_date -> Nullable<Date>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    budgets (id) {
        id -> Text,
        user_id -> Text,
        category -> Text,
        amount -> Text,
        period -> Text,
        start_date -> Date,
        alert_threshold -> Integer,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    bills (id) {
        id -> Text,
        user_id -> Text,
        name -> Text,
        amount -> Text,
        category -> Text,
        due_date -> Date,
        frequency -> Text,
        status -> Text,
        paid_date -> Nullable<Timestamp>,
        linked_account_id -> Nullable<Text>,
        reminder_days -> Integer,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    goals (id) {
        id -> Text,
        user_id -> Text,
        name -> Text,
        target_amount -> Text,
        current_amount -> Text,
        target_date -> Date,
        category -> Nullable<Text>,
        priority -> Text,
        is_completed -> Bool,
        completed_at -> Nullable<Timestamp>,
        linked_account_id -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    notifications (id) {
        id -> Text,
        user_id -> Text,
        notification_type -> Text,
        title -> Text,
        message -> Text,
        is_read -> Bool,
        priority -> Text,
        data -> Nullable<Text>,
        source_id -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::joinable!(transactions -> accounts (account_id));

diesel::allow_tables_to_appear_in_same_query!(
    accounts,
    transactions,
    budgets,
    bills,
    goals,
    notifications,
);
