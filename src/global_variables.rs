// Hosted JSON store
pub const API_BASE_URL: &str = "https://apexplus-database.onrender.com";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// REST resources
pub const RESOURCE_SCENARIOS: &str = "scenarios";
pub const RESOURCE_VEHICLES: &str = "vehicles";
pub const QUERY_SCENARIO_ID: &str = "scenarioId";

// Simulation timing
pub const TICK_INTERVAL_MS: u64 = 1000;

// Canvas geometry (pixels)
pub const CANVAS_WIDTH: u32 = 1400;
pub const CANVAS_HEIGHT: u32 = 600;
pub const GRID_SPACING: u32 = 100;
pub const VEHICLE_RADIUS: u32 = 10;

// Accepted starting positions for a new vehicle
pub const MAX_POSITION_X: i64 = 1300;
pub const MAX_POSITION_Y: i64 = 600;

// Output
pub const FRAMES_DIR: &str = "frames";
