use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxCommentRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSessionRepo {
    pub pool: PgPool,
}
