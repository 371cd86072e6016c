/// Canonical character name a script file resolves to.
/// Examples: `DIEGO_003`, `addon_JOE_005`, `Xardas`
pub type CharacterName = String;
/// Name of an input collection, used as the sheet name.
/// Examples: `Gothic`, `Gothic2`, `NotR`
pub type CollectionName = String;
/// Lowercased script file name shared by same-named files across collections.
/// Example: `dia_addon_joe_005.d`
pub type FileKey = String;
/// Dialogue key: file name with the script suffix and dialogue prefix removed.
/// Example: `Addon_Joe_005`
pub type DialogueKey = String;
/// Output tag taken from the trailing comment of a call.
/// Example: `DIA_Diego_Hallo_11_00`
pub type OutputName = String;
/// Raw identifier passed as the first or second call argument.
/// Examples: `self`, `other`, `hero`
pub type SpeakerToken = String;
/// Spoken line captured from the quoted call argument.
/// Example: `Hello there`
pub type LineText = String;
