/// Static efficiency recommendations shown on every dashboard.
pub const RECOMMENDATIONS: [&str; 5] = [
    "Tune HVAC operations with occupancy sensors",
    "Replace outdated lighting with LEDs",
    "Install building automation system (BAS)",
    "Regularly track & compare utility performance",
    "Upgrade to high-efficiency pumps & fans",
];
