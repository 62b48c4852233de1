//! Built-in registry preset
//!
//! The component layout this tool was first written for: shared widgets in
//! `common`, screen-level views in `view`, and stateful map/route modules in
//! `modules`.

use std::collections::BTreeMap;

pub const COMMON: &[&str] = &[
    "Button",
    "Checkbox",
    "DesktopNotice",
    "ErrorBoundary",
    "Input",
    "LoadingScreen",
    "Logo",
    "ModeToggle",
    "Notification",
    "RadioGroup",
    "SocialButton",
    "ThemeToggle",
];

pub const VIEW: &[&str] = &[
    "AccessibilityInfo",
    "BarrierFreeFilter",
    "BottomNavigation",
    "CategoryFilter",
    "ChatbotContent",
    "ChatbotPanel",
    "CourseThumbnailMap",
    "DogRiveAnimation",
    "FavoriteMapModal",
    "FavoritesBottomSheet",
    "JejuPalettePreview",
    "LocationPicker",
    "LocationPickerModal",
    "MapSideFilters",
    "OnboardingOverlay",
    "SideNavigation",
    "SpotDetailModal",
    "SpotInteractionSheet",
    "SwipeableCardList",
    "WeatherWidget",
];

pub const MODULES: &[&str] = &[
    "BackgroundMap",
    "GeoLocation",
    "LocationManager",
    "ProtectedRoute",
    "RouteNavigation",
];

/// The preset as a folder → names table
pub fn reference_table() -> BTreeMap<String, Vec<String>> {
    [("common", COMMON), ("view", VIEW), ("modules", MODULES)]
        .into_iter()
        .map(|(folder, names)| {
            (
                folder.to_string(),
                names.iter().map(|name| name.to_string()).collect(),
            )
        })
        .collect()
}
