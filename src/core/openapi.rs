use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::entries::{dtos as entries_dtos, handlers as entries_handlers};
use crate::features::stats::{dtos as stats_dtos, handlers as stats_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_session,
        // Entries
        entries_handlers::create_entry,
        entries_handlers::list_entries,
        entries_handlers::get_entries_for_date,
        entries_handlers::get_today_entries,
        entries_handlers::get_calendar,
        entries_handlers::export_entries,
        entries_handlers::delete_entry,
        entries_handlers::clear_entries,
        // Stats
        stats_handlers::get_stats,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::dto::SessionResponseDto,
            auth::model::AuthenticatedUser,
            ApiResponse<auth::dto::SessionResponseDto>,
            // Entries
            entries_dtos::CreateEntryDto,
            entries_dtos::EntryResponseDto,
            entries_dtos::CalendarDayDto,
            entries_dtos::DeleteEntryResponseDto,
            entries_dtos::ClearEntriesResponseDto,
            ApiResponse<entries_dtos::EntryResponseDto>,
            ApiResponse<Vec<entries_dtos::EntryResponseDto>>,
            ApiResponse<Vec<entries_dtos::CalendarDayDto>>,
            ApiResponse<entries_dtos::DeleteEntryResponseDto>,
            ApiResponse<entries_dtos::ClearEntriesResponseDto>,
            // Stats
            stats_dtos::JournalStatsDto,
            ApiResponse<stats_dtos::JournalStatsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Session introspection"),
        (name = "entries", description = "Daily photo+reflection journal entries"),
        (name = "stats", description = "Streak and aggregate statistics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "QuietRoom API",
        version = "0.1.0",
        description = "API documentation for QuietRoom",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
