//! Static text for the Scope of Work sheet.

/// Note shown in the box at the top of the Scope of Work sheet.
pub const DISCLAIMER: &str = "Note: This SoW describes the Scope of the Assignment, the Terms, \
and the Timelines for delivery in order to formalize this assignment. It also intends to share \
with you the processes and systems that we follow in our engagements with Client.";

/// One titled `Sr. No` / `Particulars` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermsSection {
    pub title: &'static str,
    pub items: &'static [(u32, &'static str)],
}

pub const SCOPE_OF_WORK: TermsSection = TermsSection {
    title: "Scope of Work",
    items: &[
        (1, "Site Coordination and Prerequisites Clearance."),
        (2, "Detailed schematic drawings according to the design."),
        (3, "Conduit layout drawings/equipment layout drawings, showing mounting location."),
        (4, "Laying of all AV Cables."),
        (5, "Termination of cables with respective connectors."),
        (6, "Installation of all AV equipment in rack as per layout."),
        (7, "Configuration of Audio/Video Switcher."),
        (8, "Configuration of DSP mixer."),
        (9, "Touch Panel Design."),
        (10, "System programming as per design requirement."),
    ],
};

pub const EXCLUSIONS: TermsSection = TermsSection {
    title: "Exclusions and Dependencies",
    items: &[
        (1, "The scope of work described in this SoW does not include the following items of work, which need to be arranged by the client on site:"),
        (2, "Civil work like cutting of false ceilings, chipping, etc."),
        (3, "Electrical work like laying of conduits, raceways, and providing stabilised power supply with zero bias between Earth and Neutral to all required locations."),
        (4, "Carpentry work like cutouts on furniture, etc."),
        (5, "Connectivity for electric power, LAN, telephone, IP (1 Mbps), and ISDN (1 Mbps) & cable TV points where necessary and provision of power circuit for AV system on the same phase."),
        (6, "Ballasts (0 to 10 volts) in case of fluorescent dimming for lights."),
        (7, "Shelves for mounting devices (in case the supply of rack isn't in the SOW)."),
        (8, "Adequate cooling/ventilation for all equipment racks and cabinets."),
    ],
};

/// Sections in the order they appear on the sheet.
pub const SECTIONS: [TermsSection; 2] = [SCOPE_OF_WORK, EXCLUSIONS];
