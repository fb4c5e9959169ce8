use crate::core::Channel;

const HLS_BASE: &str = "https://cvtv.cvalley.net/hls";

/// (name, stream id, group) for every station carried by default.
const STATIONS: [(&str, &str, &str); 33] = [
    ("KOMU CW", "KOMUCW", "Local"),
    ("KCTV CBS", "KCTVCBS", "Local"),
    ("KMBC ABC", "KMBCABC", "Local"),
    ("KMCI IND", "KMCIIND", "Local"),
    ("KOMU NBC", "KOMUNBC", "Local"),
    ("KRCG CBS", "KRCGCBS", "Local"),
    ("KSHB NBC", "KSHBNBC", "Local"),
    ("KTVO ABC", "KTVOABC", "Local"),
    ("KYOU FOX", "KYOUFOX", "Local"),
    ("KTVO CBS", "KTVOCBS", "Local"),
    ("KQFX FOX", "KQFXFOX", "Local"),
    ("WDAF FOX", "WDAFFox", "Local"),
    ("KNLJ", "KNLJ", "Local"),
    ("KCPT PBS", "KCPTPBS", "Local"),
    ("KCWE CE", "KCWECW", "Local"),
    ("KMBC MeTV", "KMBCMeTV", "Subchannel"),
    ("KMCI Bounce TV", "KMCIBounceTV", "Subchannel"),
    ("KMIZ MeTV", "KMIZMeTV", "Subchannel"),
    ("KMSO PBS", "KMOSPBS", "Local"),
    ("KPXE ION", "KPXEION", "Subchannel"),
    ("KRCG Comet", "KRCGComet", "Subchannel"),
    ("KRCG CHARGE", "KRCGCHARGE", "Subchannel"),
    ("KRCG TBD", "KRCGTBD", "Subchannel"),
    ("KSHB COZI", "KSHBCozi", "Subchannel"),
    ("KSHB LAFF", "KSHBLaff", "Subchannel"),
    ("KSMO IND", "KSMOIND", "Local"),
    ("KTVO Comet", "KTVOComet", "Subchannel"),
    ("KYOU NBC", "KYOUNBC", "Local"),
    ("KYOU NBC2", "KYOUNBC2", "Local"),
    ("KYOU GRIT", "KYOUGrit", "Subchannel"),
    ("KYOU DT4", "KYOUDT4", "Subchannel"),
    ("KYOU MYZOU", "KZOUMYZOU", "Subchannel"),
    ("WDAF Antenna", "WDAFAntenna", "Subchannel"),
];

/// The channel list used when neither the config file nor `--channels`
/// supplies one.
pub fn default_channels() -> Vec<Channel> {
    STATIONS
        .iter()
        .map(|(name, id, group)| {
            Channel::with_group(*name, format!("{HLS_BASE}/{id}/{id}.m3u8"), *group)
        })
        .collect()
}
