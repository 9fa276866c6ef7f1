// src/repo/rewards.rs

use sqlx::PgPool;

use crate::models::reward::Reward;

pub async fn for_class(pool: &PgPool, class_code: &str) -> Result<Vec<Reward>, sqlx::Error> {
    sqlx::query_as::<_, Reward>(
        r#"
        SELECT id, class_code, required_points, reward_name, reward_description
        FROM rewards
        WHERE class_code = $1
        ORDER BY required_points
        "#,
    )
    .bind(class_code)
    .fetch_all(pool)
    .await
}
