//! ISO 639-2 language codes, as carried by [SetMenuLanguage](crate::Command::SetMenuLanguage).

/// ISO 639-2 codes (terminology form where it differs from the bibliographic one)
/// plus the ISO 639-3 codes of languages that have a system locale. Sorted.
static LANGUAGE_CODES: &[&str] = &[
    "aar", "abk", "ace", "ach", "ada", "ady", "afa", "afh", "afr", "agr", "ain", "aka", "akk",
    "ale", "alg", "alt", "amh", "ang", "anp", "apa", "ara", "arc", "arg", "arn", "arp", "art",
    "arw", "asm", "ast", "ath", "aus", "ava", "ave", "awa", "ayc", "aym", "aze", "bad", "bai",
    "bak", "bal", "bam", "ban", "bas", "bat", "bej", "bel", "bem", "ben", "ber", "bhb", "bho",
    "bih", "bik", "bin", "bis", "bla", "bnt", "bod", "bos", "bra", "bre", "brx", "btk", "bua",
    "bug", "bul", "byn", "cad", "cai", "car", "cat", "cau", "ceb", "cel", "ces", "cha", "chb",
    "che", "chg", "chk", "chm", "chn", "cho", "chp", "chr", "chu", "chv", "chy", "ckb", "cmc",
    "cmn", "cnr", "cop", "cor", "cos", "cpe", "cpf", "cpp", "cre", "crh", "crp", "csb", "cus",
    "cym", "dak", "dan", "dar", "day", "del", "den", "deu", "dgr", "din", "div", "doi", "dra",
    "dsb", "dua", "dum", "dyu", "dzo", "efi", "egy", "eka", "ell", "elx", "eng", "enm", "epo",
    "est", "eus", "ewe", "ewo", "fan", "fao", "fas", "fat", "fij", "fil", "fin", "fiu", "fon",
    "fra", "frm", "fro", "frr", "frs", "fry", "ful", "fur", "gaa", "gay", "gba", "gem", "gez",
    "gil", "gla", "gle", "glg", "glv", "gmh", "goh", "gon", "gor", "got", "grb", "grc", "grn",
    "gsw", "guj", "gwi", "hai", "hak", "hat", "hau", "haw", "heb", "her", "hif", "hil", "him",
    "hin", "hit", "hmn", "hmo", "hne", "hrv", "hsb", "hun", "hup", "hye", "iba", "ibo", "ido",
    "iii", "ijo", "iku", "ile", "ilo", "ina", "inc", "ind", "ine", "inh", "ipk", "ira", "iro",
    "isl", "ita", "jav", "jbo", "jpn", "jpr", "jrb", "kaa", "kab", "kac", "kal", "kam", "kan",
    "kar", "kas", "kat", "kau", "kaw", "kaz", "kbd", "kha", "khi", "khm", "kho", "kik", "kin",
    "kir", "kmb", "kok", "kom", "kon", "kor", "kos", "kpe", "krc", "krl", "kro", "kru", "kua",
    "kum", "kur", "kut", "lad", "lah", "lam", "lao", "lat", "lav", "lez", "lij", "lim", "lin",
    "lit", "lol", "loz", "ltz", "lua", "lub", "lug", "lui", "lun", "luo", "lus", "lzh", "mad",
    "mag", "mah", "mai", "mak", "mal", "man", "map", "mar", "mas", "mdf", "mdr", "men", "mfe",
    "mga", "mhr", "mic", "min", "miq", "mis", "mjw", "mkd", "mkh", "mlg", "mlt", "mnc", "mni",
    "mno", "mnw", "moh", "mon", "mos", "mri", "msa", "mul", "mun", "mus", "mwl", "mwr", "mya",
    "myn", "myv", "nah", "nai", "nan", "nap", "nau", "nav", "nbl", "nde", "ndo", "nds", "nep",
    "new", "nhn", "nia", "nic", "niu", "nld", "nno", "nob", "nog", "non", "nor", "nqo", "nso",
    "nub", "nwc", "nya", "nym", "nyn", "nyo", "nzi", "oci", "oji", "ori", "orm", "osa", "oss",
    "ota", "oto", "paa", "pag", "pal", "pam", "pan", "pap", "pau", "peo", "phi", "phn", "pli",
    "pol", "pon", "por", "pra", "pro", "pus", "que", "quz", "raj", "rap", "rar", "rif", "roa",
    "roh", "rom", "ron", "run", "rup", "rus", "sad", "sag", "sah", "sai", "sal", "sam", "san",
    "sas", "sat", "scn", "sco", "sel", "sem", "sga", "sgn", "sgs", "shn", "shs", "sid", "sin",
    "sio", "sit", "sla", "slk", "slv", "sma", "sme", "smi", "smj", "smn", "smo", "sms", "sna",
    "snd", "snk", "sog", "som", "son", "sot", "spa", "sqi", "srd", "srn", "srp", "srr", "ssa",
    "ssw", "suk", "sun", "sus", "sux", "swa", "swe", "syc", "syr", "szl", "tah", "tai", "tam",
    "tat", "tcy", "tel", "tem", "ter", "tet", "tgk", "tgl", "tha", "the", "tig", "tir", "tiv",
    "tkl", "tlh", "tli", "tmh", "tog", "ton", "tpi", "tsi", "tsn", "tso", "tuk", "tum", "tup",
    "tur", "tut", "tvl", "twi", "tyv", "udm", "uga", "uig", "ukr", "umb", "und", "unm", "urd",
    "uzb", "vai", "ven", "vie", "vol", "vot", "wae", "wak", "wal", "war", "was", "wen", "wln",
    "wol", "xal", "xho", "yao", "yap", "yid", "yor", "ypk", "yue", "yuw", "zap", "zbl", "zen",
    "zgh", "zha", "zho", "znd", "zul", "zun", "zxx", "zza",
];

/// Menu language a follower starts with.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Whether `code` is a known three letter language code.
///
/// Only lowercase codes match.
/// ```
/// # use cec_follower::language::is_valid_language_code;
/// assert!(is_valid_language_code("heb"));
/// assert!(!is_valid_language_code("xyz"));
/// ```
pub fn is_valid_language_code(code: &str) -> bool {
    code.len() == 3 && LANGUAGE_CODES.binary_search(&code).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        assert!(LANGUAGE_CODES.windows(2).all(|w| w[0] < w[1]));
        assert!(LANGUAGE_CODES.iter().all(|c| c.len() == 3));
    }

    #[test]
    fn test_known_codes() {
        for code in ["eng", "deu", "fra", "heb", "jpn", "zho", DEFAULT_LANGUAGE] {
            assert!(is_valid_language_code(code), "{code}");
        }
        for code in ["", "en", "engl", "ENG", "xyz", "ger"] {
            assert!(!is_valid_language_code(code), "{code}");
        }
    }

    #[test]
    fn test_locale_only_codes() {
        for code in ["ast", "ckb", "fil", "gsw", "yue", "nan"] {
            assert!(is_valid_language_code(code), "{code}");
        }
    }
}
