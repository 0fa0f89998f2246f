//! Shared application state injected into all handlers.

use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::{
    AuthService, CatalogService, RecipeService, SubscriptionService, UserService,
};
use crate::infrastructure::persistence::{
    PgIngredientRepository, PgMarkRepository, PgRecipeRepository, PgSubscriptionRepository,
    PgTagRepository, PgTokenRepository, PgUserRepository,
};

pub type DbAuthService = AuthService<PgTokenRepository, PgUserRepository>;
pub type DbUserService = UserService<PgUserRepository, PgSubscriptionRepository>;
pub type DbSubscriptionService =
    SubscriptionService<PgSubscriptionRepository, PgUserRepository, PgRecipeRepository>;
pub type DbRecipeService = RecipeService<
    PgRecipeRepository,
    PgTagRepository,
    PgIngredientRepository,
    PgMarkRepository,
    PgSubscriptionRepository,
>;
pub type DbCatalogService = CatalogService<PgTagRepository, PgIngredientRepository>;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<DbAuthService>,
    pub user_service: Arc<DbUserService>,
    pub subscription_service: Arc<DbSubscriptionService>,
    pub recipe_service: Arc<DbRecipeService>,
    pub catalog_service: Arc<DbCatalogService>,
    pub media_root: Arc<PathBuf>,
    pub page_size: u32,
}

impl AppState {
    /// Wires every repository and service over one connection pool.
    pub fn new(
        pool: Arc<PgPool>,
        token_signing_secret: String,
        media_root: PathBuf,
        page_size: u32,
    ) -> Self {
        let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
        let token_repo = Arc::new(PgTokenRepository::new(pool.clone()));
        let tag_repo = Arc::new(PgTagRepository::new(pool.clone()));
        let ingredient_repo = Arc::new(PgIngredientRepository::new(pool.clone()));
        let recipe_repo = Arc::new(PgRecipeRepository::new(pool.clone()));
        let mark_repo = Arc::new(PgMarkRepository::new(pool.clone()));
        let subscription_repo = Arc::new(PgSubscriptionRepository::new(pool));

        Self {
            auth_service: Arc::new(AuthService::new(
                token_repo,
                user_repo.clone(),
                token_signing_secret,
            )),
            user_service: Arc::new(UserService::new(
                user_repo.clone(),
                subscription_repo.clone(),
            )),
            subscription_service: Arc::new(SubscriptionService::new(
                subscription_repo.clone(),
                user_repo,
                recipe_repo.clone(),
            )),
            recipe_service: Arc::new(RecipeService::new(
                recipe_repo,
                tag_repo.clone(),
                ingredient_repo.clone(),
                mark_repo,
                subscription_repo,
            )),
            catalog_service: Arc::new(CatalogService::new(tag_repo, ingredient_repo)),
            media_root: Arc::new(media_root),
            page_size,
        }
    }
}
