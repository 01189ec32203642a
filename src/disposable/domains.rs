use phf::phf_set;

/// Throw-away mail providers. Lowercase, no trailing dot.
pub(crate) static BUILTIN_DOMAINS: phf::Set<&'static str> = phf_set! {
    "0815.ru",
    "0wnd.net",
    "10minutemail.com",
    "10minutemail.net",
    "20minutemail.com",
    "33mail.com",
    "anonbox.net",
    "armyspy.com",
    "binkmail.com",
    "bobmail.info",
    "bugmenot.com",
    "burnermail.io",
    "chammy.info",
    "cuvox.de",
    "dayrep.com",
    "deadaddress.com",
    "discard.email",
    "discardmail.com",
    "dispostable.com",
    "dodgit.com",
    "dropmail.me",
    "einrot.com",
    "emailondeck.com",
    "fakeinbox.com",
    "fakemailgenerator.com",
    "filzmail.com",
    "fleckens.hu",
    "getairmail.com",
    "getnada.com",
    "gishpuppy.com",
    "grr.la",
    "guerrillamail.biz",
    "guerrillamail.com",
    "guerrillamail.de",
    "guerrillamail.info",
    "guerrillamail.net",
    "guerrillamail.org",
    "guerrillamailblock.com",
    "gustr.com",
    "harakirimail.com",
    "incognitomail.org",
    "jetable.org",
    "jourrapide.com",
    "kasmail.com",
    "mailcatch.com",
    "maildrop.cc",
    "mailexpire.com",
    "mailforspam.com",
    "mailinator.com",
    "mailinator.net",
    "mailinator2.com",
    "mailnesia.com",
    "mailnull.com",
    "mailsac.com",
    "mintemail.com",
    "moakt.com",
    "mohmal.com",
    "mt2015.com",
    "mytemp.email",
    "mytrashmail.com",
    "nospam.ze.tc",
    "nowmymail.com",
    "pokemail.net",
    "rhyta.com",
    "rmqkr.net",
    "sharklasers.com",
    "sofimail.com",
    "spam4.me",
    "spambog.com",
    "spambox.us",
    "spamgourmet.com",
    "spamherelots.com",
    "spaml.de",
    "spammotel.com",
    "superrito.com",
    "teleworm.us",
    "temp-mail.org",
    "tempail.com",
    "tempinbox.com",
    "tempmail.net",
    "tempmailaddress.com",
    "tempr.email",
    "thisisnotmyrealemail.com",
    "throwawaymail.com",
    "trash-mail.com",
    "trashmail.com",
    "trashmail.de",
    "trashmail.me",
    "trashmail.net",
    "trbvm.com",
    "wegwerfmail.de",
    "wegwerfmail.net",
    "yopmail.com",
    "yopmail.fr",
    "yopmail.net",
    "zehnminutenmail.de",
    "zoemail.org",
};
