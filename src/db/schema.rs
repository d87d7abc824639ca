diesel::table! {
    videos (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        video_url -> Varchar,
        category -> Varchar,
        tags -> Array<Text>,
        thumbnail -> Nullable<Varchar>,
        duration -> Nullable<Varchar>,
        view_count -> Nullable<Int8>,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}
