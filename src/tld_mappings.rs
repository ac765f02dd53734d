use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Used when a TLD has no entry in the table.
pub const FALLBACK_WHOIS_SERVER: &str = "whois.iana.org";

// Registry WHOIS servers keyed by TLD. Lookups that miss fall back to IANA,
// which answers with a `refer:` line the referral chaser follows.
pub static TLD_WHOIS_SERVERS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Generic TLDs
    map.insert("com", "whois.verisign-grs.com");
    map.insert("net", "whois.verisign-grs.com");
    map.insert("org", "whois.pir.org");
    map.insert("info", "whois.afilias.net");
    map.insert("biz", "whois.neulevel.biz");
    map.insert("io", "whois.nic.io");
    map.insert("co", "whois.nic.co");
    map.insert("app", "whois.nic.google");
    map.insert("dev", "whois.nic.google");
    map.insert("page", "whois.nic.google");
    map.insert("cloud", "whois.nic.cloud");
    map.insert("xyz", "whois.nic.xyz");
    map.insert("site", "whois.nic.site");
    map.insert("online", "whois.nic.online");
    map.insert("top", "whois.nic.top");
    map.insert("store", "whois.nic.store");
    map.insert("shop", "whois.nic.shop");
    map.insert("blog", "whois.nic.blog");
    map.insert("tech", "whois.nic.tech");
    map.insert("design", "whois.nic.design");
    map.insert("money", "whois.nic.money");
    map.insert("email", "whois.nic.email");
    map.insert("live", "whois.nic.live");
    map.insert("club", "whois.nic.club");
    map.insert("news", "whois.nic.news");
    map.insert("wiki", "whois.nic.wiki");
    map.insert("global", "whois.nic.global");
    map.insert("digital", "whois.nic.digital");

    // Country code TLDs
    map.insert("us", "whois.nic.us");
    map.insert("uk", "whois.nic.uk");
    map.insert("de", "whois.denic.de");
    map.insert("fr", "whois.nic.fr");
    map.insert("ca", "whois.cira.ca");
    map.insert("au", "whois.auda.org.au");
    map.insert("nl", "whois.domain-registry.nl");
    map.insert("ru", "whois.tcinet.ru");
    map.insert("ch", "whois.nic.ch");
    map.insert("es", "whois.nic.es");
    map.insert("it", "whois.nic.it");
    map.insert("jp", "whois.jprs.jp");
    map.insert("cn", "whois.cnnic.cn");
    map.insert("in", "whois.registry.in");
    map.insert("br", "whois.registro.br");
    map.insert("mx", "whois.mx");
    map.insert("nz", "whois.nic.nz");
    map.insert("se", "whois.iis.se");
    map.insert("no", "whois.norid.no");
    map.insert("dk", "whois.dk-hostmaster.dk");
    map.insert("fi", "whois.fi");
    map.insert("kr", "whois.kr");
    map.insert("pl", "whois.dns.pl");
    map.insert("be", "whois.dns.be");
    map.insert("at", "whois.nic.at");
    map.insert("hk", "whois.hkirc.hk");
    map.insert("sg", "whois.sgnic.sg");
    map.insert("tw", "whois.twnic.net.tw");
    map.insert("ie", "whois.iedr.ie");
    map.insert("za", "whois.registry.net.za");
    map.insert("tr", "whois.nic.tr");
    map.insert("il", "whois.isoc.org.il");
    map.insert("ua", "whois.ua");
    map.insert("gr", "whois.nic.gr");
    map.insert("ro", "whois.rotld.ro");
    map.insert("th", "whois.thnic.co.th");
    map.insert("my", "whois.mynic.my");
    map.insert("pt", "whois.dns.pt");
    map.insert("hu", "whois.nic.hu");
    map.insert("cz", "whois.nic.cz");
    map.insert("sk", "whois.sk-nic.sk");
    map.insert("ar", "whois.nic.ar");
    map.insert("cl", "whois.nic.cl");
    map.insert("pe", "kero.yachay.pe");
    map.insert("ec", "whois.nic.ec");
    map.insert("uy", "whois.nic.org.uy");
    map.insert("ve", "whois.nic.ve");
    map.insert("ac", "whois.nic.ac");
    map.insert("ae", "whois.aeda.net.ae");
    map.insert("af", "whois.nic.af");
    map.insert("ag", "whois.nic.ag");
    map.insert("ai", "whois.nic.ai");
    map.insert("al", "whois.ripe.net");
    map.insert("am", "whois.amnic.net");
    map.insert("as", "whois.nic.as");
    map.insert("asia", "whois.nic.asia");
    map.insert("az", "whois.ripe.net");
    map.insert("ba", "whois.ripe.net");
    map.insert("bg", "whois.register.bg");
    map.insert("bi", "whois.nic.bi");
    map.insert("bj", "whois.nic.bj");
    map.insert("bm", "whois.afilias-srs.net");
    map.insert("bn", "whois.bn");
    map.insert("bo", "whois.nic.bo");
    map.insert("by", "whois.cctld.by");
    map.insert("bz", "whois.afilias-grs.info");
    map.insert("cat", "whois.nic.cat");
    map.insert("cc", "whois.nic.cc");
    map.insert("cd", "whois.nic.cd");
    map.insert("cf", "whois.dot.cf");
    map.insert("ci", "whois.nic.ci");
    map.insert("cm", "whois.netcom.cm");
    map.insert("cr", "whois.nic.cr");
    map.insert("cu", "whois.nic.cu");
    map.insert("cx", "whois.nic.cx");
    map.insert("cy", "whois.ripe.net");
    map.insert("dz", "whois.nic.dz");
    map.insert("ee", "whois.tld.ee");
    map.insert("eu", "whois.eu");
    map.insert("fm", "whois.nic.fm");
    map.insert("fo", "whois.nic.fo");
    map.insert("ga", "whois.dot.ga");
    map.insert("gd", "whois.nic.gd");
    map.insert("gf", "whois.mediaserv.net");
    map.insert("gg", "whois.gg");
    map.insert("gi", "whois2.afilias-grs.net");
    map.insert("gl", "whois.nic.gl");
    map.insert("gp", "whois.nic.gp");
    map.insert("gs", "whois.nic.gs");
    map.insert("gt", "whois.nic.gt");
    map.insert("gy", "whois.registry.gy");
    map.insert("hm", "whois.registry.hm");
    map.insert("hn", "whois.nic.hn");
    map.insert("hr", "whois.dns.hr");
    map.insert("ht", "whois.nic.ht");
    map.insert("im", "whois.nic.im");
    map.insert("iq", "whois.cmc.iq");
    map.insert("ir", "whois.nic.ir");
    map.insert("is", "whois.isnic.is");
    map.insert("je", "whois.je");
    map.insert("jo", "whois.nic.jo");
    map.insert("ke", "whois.kenic.or.ke");
    map.insert("kg", "whois.domain.kg");
    map.insert("ki", "whois.nic.ki");
    map.insert("kn", "whois.nic.kn");
    map.insert("kz", "whois.nic.kz");
    map.insert("la", "whois.nic.la");
    map.insert("lc", "whois.nic.lc");
    map.insert("li", "whois.nic.li");
    map.insert("lk", "whois.nic.lk");
    map.insert("lt", "whois.domreg.lt");
    map.insert("lu", "whois.dns.lu");
    map.insert("lv", "whois.nic.lv");
    map.insert("ly", "whois.nic.ly");
    map.insert("ma", "whois.registre.ma");
    map.insert("mc", "whois.ripe.net");
    map.insert("md", "whois.nic.md");
    map.insert("me", "whois.nic.me");
    map.insert("mg", "whois.nic.mg");
    map.insert("mk", "whois.marnet.mk");
    map.insert("ml", "whois.dot.ml");
    map.insert("mm", "whois.nic.mm");
    map.insert("mn", "whois.nic.mn");
    map.insert("mo", "whois.monic.mo");
    map.insert("mp", "whois.nic.mp");
    map.insert("ms", "whois.nic.ms");
    map.insert("mu", "whois.nic.mu");
    map.insert("mw", "whois.nic.mw");
    map.insert("mz", "whois.nic.mz");
    map.insert("na", "whois.na-nic.com.na");
    map.insert("nc", "whois.nc");
    map.insert("nf", "whois.nic.nf");
    map.insert("ng", "whois.nic.net.ng");
    map.insert("nu", "whois.iis.nu");
    map.insert("om", "whois.registry.om");
    map.insert("pr", "whois.nic.pr");
    map.insert("ps", "whois.pnina.ps");
    map.insert("qa", "whois.registry.qa");
    map.insert("re", "whois.nic.re");
    map.insert("rs", "whois.rnids.rs");
    map.insert("sa", "whois.nic.net.sa");
    map.insert("sb", "whois.nic.sb");
    map.insert("sc", "whois.nic.sc");
    map.insert("sd", "whois.sd");
    map.insert("si", "whois.register.si");
    map.insert("sl", "whois.nic.sl");
    map.insert("sm", "whois.nic.sm");
    map.insert("sn", "whois.nic.sn");
    map.insert("so", "whois.nic.so");
    map.insert("sr", "whois.nic.sr");
    map.insert("st", "whois.nic.st");
    map.insert("su", "whois.tcinet.ru");
    map.insert("sx", "whois.sx");
    map.insert("sy", "whois.tld.sy");
    map.insert("tc", "whois.nic.tc");
    map.insert("tf", "whois.nic.tf");
    map.insert("tg", "whois.nic.tg");
    map.insert("tj", "whois.nic.tj");
    map.insert("tk", "whois.dot.tk");
    map.insert("tl", "whois.nic.tl");
    map.insert("tm", "whois.nic.tm");
    map.insert("tn", "whois.ati.tn");
    map.insert("to", "whois.tonic.to");
    map.insert("tv", "whois.nic.tv");
    map.insert("tz", "whois.tznic.or.tz");
    map.insert("ug", "whois.co.ug");
    map.insert("vc", "whois.nic.vc");
    map.insert("vg", "whois.nic.vg");
    map.insert("vu", "whois.nic.vu");
    map.insert("wf", "whois.nic.wf");
    map.insert("ws", "whois.website.ws");
    map.insert("yt", "whois.nic.yt");

    // New gTLDs
    map.insert("academy", "whois.nic.academy");
    map.insert("accountant", "whois.nic.accountant");
    map.insert("actor", "whois.nic.actor");
    map.insert("agency", "whois.nic.agency");
    map.insert("airforce", "whois.nic.airforce");
    map.insert("apartments", "whois.nic.apartments");
    map.insert("army", "whois.nic.army");
    map.insert("art", "whois.nic.art");
    map.insert("associates", "whois.nic.associates");
    map.insert("attorney", "whois.nic.attorney");
    map.insert("auction", "whois.nic.auction");
    map.insert("audio", "whois.nic.audio");
    map.insert("auto", "whois.nic.auto");
    map.insert("band", "whois.nic.band");
    map.insert("bar", "whois.nic.bar");
    map.insert("bargains", "whois.nic.bargains");
    map.insert("beer", "whois.nic.beer");
    map.insert("best", "whois.nic.best");
    map.insert("bid", "whois.nic.bid");
    map.insert("bike", "whois.nic.bike");
    map.insert("bingo", "whois.nic.bingo");
    map.insert("black", "whois.nic.black");
    map.insert("blue", "whois.nic.blue");
    map.insert("boutique", "whois.nic.boutique");
    map.insert("builders", "whois.nic.builders");
    map.insert("business", "whois.nic.business");
    map.insert("buzz", "whois.nic.buzz");
    map.insert("cab", "whois.nic.cab");
    map.insert("cafe", "whois.nic.cafe");
    map.insert("camera", "whois.nic.camera");
    map.insert("camp", "whois.nic.camp");
    map.insert("capital", "whois.nic.capital");
    map.insert("cards", "whois.nic.cards");
    map.insert("care", "whois.nic.care");
    map.insert("careers", "whois.nic.careers");
    map.insert("cash", "whois.nic.cash");
    map.insert("casino", "whois.nic.casino");
    map.insert("catering", "whois.nic.catering");
    map.insert("center", "whois.nic.center");
    map.insert("ceo", "whois.nic.ceo");
    map.insert("chat", "whois.nic.chat");
    map.insert("cheap", "whois.nic.cheap");
    map.insert("christmas", "whois.nic.christmas");
    map.insert("church", "whois.nic.church");
    map.insert("city", "whois.nic.city");
    map.insert("claims", "whois.nic.claims");
    map.insert("cleaning", "whois.nic.cleaning");
    map.insert("click", "whois.nic.click");
    map.insert("clinic", "whois.nic.clinic");
    map.insert("clothing", "whois.nic.clothing");
    map.insert("coach", "whois.nic.coach");
    map.insert("codes", "whois.nic.codes");
    map.insert("coffee", "whois.nic.coffee");
    map.insert("community", "whois.nic.community");
    map.insert("company", "whois.nic.company");
    map.insert("computer", "whois.nic.computer");
    map.insert("condos", "whois.nic.condos");
    map.insert("construction", "whois.nic.construction");
    map.insert("consulting", "whois.nic.consulting");
    map.insert("contractors", "whois.nic.contractors");
    map.insert("cool", "whois.nic.cool");
    map.insert("coupons", "whois.nic.coupons");
    map.insert("credit", "whois.nic.credit");
    map.insert("creditcard", "whois.nic.creditcard");
    map.insert("cruises", "whois.nic.cruises");
    map.insert("dance", "whois.nic.dance");
    map.insert("dating", "whois.nic.dating");
    map.insert("deals", "whois.nic.deals");
    map.insert("degree", "whois.nic.degree");
    map.insert("delivery", "whois.nic.delivery");
    map.insert("democrat", "whois.nic.democrat");
    map.insert("dental", "whois.nic.dental");
    map.insert("dentist", "whois.nic.dentist");
    map.insert("diamonds", "whois.nic.diamonds");
    map.insert("diet", "whois.nic.diet");
    map.insert("direct", "whois.nic.direct");
    map.insert("directory", "whois.nic.directory");
    map.insert("discount", "whois.nic.discount");
    map.insert("doctor", "whois.nic.doctor");
    map.insert("dog", "whois.nic.dog");
    map.insert("domains", "whois.nic.domains");
    map.insert("education", "whois.nic.education");
    map.insert("energy", "whois.nic.energy");
    map.insert("engineer", "whois.nic.engineer");
    map.insert("engineering", "whois.nic.engineering");
    map.insert("enterprises", "whois.nic.enterprises");
    map.insert("equipment", "whois.nic.equipment");
    map.insert("estate", "whois.nic.estate");
    map.insert("events", "whois.nic.events");
    map.insert("exchange", "whois.nic.exchange");
    map.insert("expert", "whois.nic.expert");
    map.insert("exposed", "whois.nic.exposed");
    map.insert("express", "whois.nic.express");
    map.insert("fail", "whois.nic.fail");
    map.insert("faith", "whois.nic.faith");
    map.insert("family", "whois.nic.family");
    map.insert("fans", "whois.nic.fans");
    map.insert("farm", "whois.nic.farm");
    map.insert("fashion", "whois.nic.fashion");
    map.insert("film", "whois.nic.film");
    map.insert("finance", "whois.nic.finance");
    map.insert("financial", "whois.nic.financial");
    map.insert("fish", "whois.nic.fish");
    map.insert("fishing", "whois.nic.fishing");
    map.insert("fit", "whois.nic.fit");
    map.insert("fitness", "whois.nic.fitness");
    map.insert("flights", "whois.nic.flights");
    map.insert("florist", "whois.nic.florist");
    map.insert("football", "whois.nic.football");
    map.insert("forex", "whois.nic.forex");
    map.insert("forsale", "whois.nic.forsale");
    map.insert("foundation", "whois.nic.foundation");
    map.insert("fund", "whois.nic.fund");
    map.insert("furniture", "whois.nic.furniture");
    map.insert("futbol", "whois.nic.futbol");
    map.insert("fyi", "whois.nic.fyi");
    map.insert("gallery", "whois.nic.gallery");
    map.insert("games", "whois.nic.games");
    map.insert("garden", "whois.nic.garden");
    map.insert("gift", "whois.nic.gift");
    map.insert("gifts", "whois.nic.gifts");
    map.insert("gives", "whois.nic.gives");
    map.insert("glass", "whois.nic.glass");
    map.insert("golf", "whois.nic.golf");
    map.insert("graphics", "whois.nic.graphics");
    map.insert("gratis", "whois.nic.gratis");
    map.insert("green", "whois.nic.green");
    map.insert("gripe", "whois.nic.gripe");
    map.insert("group", "whois.nic.group");
    map.insert("guide", "whois.nic.guide");
    map.insert("guitars", "whois.nic.guitars");
    map.insert("guru", "whois.nic.guru");
    map.insert("haus", "whois.nic.haus");
    map.insert("healthcare", "whois.nic.healthcare");
    map.insert("help", "whois.nic.help");
    map.insert("hiphop", "whois.nic.hiphop");
    map.insert("hockey", "whois.nic.hockey");
    map.insert("holdings", "whois.nic.holdings");
    map.insert("holiday", "whois.nic.holiday");
    map.insert("homes", "whois.nic.homes");
    map.insert("horse", "whois.nic.horse");
    map.insert("hospital", "whois.nic.hospital");
    map.insert("host", "whois.nic.host");
    map.insert("hosting", "whois.nic.hosting");
    map.insert("house", "whois.nic.house");
    map.insert("how", "whois.nic.how");
    map.insert("ink", "whois.nic.ink");
    map.insert("institute", "whois.nic.institute");
    map.insert("insurance", "whois.nic.insurance");
    map.insert("international", "whois.nic.international");
    map.insert("investments", "whois.nic.investments");
    map.insert("jetzt", "whois.nic.jetzt");
    map.insert("jewelry", "whois.nic.jewelry");
    map.insert("jobs", "whois.nic.jobs");
    map.insert("juegos", "whois.nic.juegos");
    map.insert("kaufen", "whois.nic.kaufen");
    map.insert("kim", "whois.nic.kim");
    map.insert("kitchen", "whois.nic.kitchen");
    map.insert("land", "whois.nic.land");
    map.insert("lawyer", "whois.nic.lawyer");
    map.insert("lease", "whois.nic.lease");
    map.insert("legal", "whois.nic.legal");
    map.insert("lgbt", "whois.nic.lgbt");
    map.insert("life", "whois.nic.life");
    map.insert("lighting", "whois.nic.lighting");
    map.insert("limited", "whois.nic.limited");
    map.insert("limo", "whois.nic.limo");
    map.insert("link", "whois.nic.link");
    map.insert("loan", "whois.nic.loan");
    map.insert("loans", "whois.nic.loans");
    map.insert("lol", "whois.nic.lol");
    map.insert("love", "whois.nic.love");
    map.insert("ltd", "whois.nic.ltd");
    map.insert("luxe", "whois.nic.luxe");
    map.insert("luxury", "whois.nic.luxury");
    map.insert("maison", "whois.nic.maison");
    map.insert("management", "whois.nic.management");
    map.insert("market", "whois.nic.market");
    map.insert("marketing", "whois.nic.marketing");
    map.insert("mba", "whois.nic.mba");
    map.insert("media", "whois.nic.media");
    map.insert("memorial", "whois.nic.memorial");
    map.insert("men", "whois.nic.men");
    map.insert("menu", "whois.nic.menu");
    map.insert("mobi", "whois.nic.mobi");
    map.insert("moda", "whois.nic.moda");
    map.insert("mom", "whois.nic.mom");
    map.insert("mortgage", "whois.nic.mortgage");
    map.insert("motorcycles", "whois.nic.motorcycles");
    map.insert("movie", "whois.nic.movie");
    map.insert("navy", "whois.nic.navy");
    map.insert("network", "whois.nic.network");
    map.insert("ninja", "whois.nic.ninja");
    map.insert("one", "whois.nic.one");
    map.insert("onl", "whois.nic.onl");
    map.insert("ooo", "whois.nic.ooo");
    map.insert("partners", "whois.nic.partners");
    map.insert("parts", "whois.nic.parts");
    map.insert("party", "whois.nic.party");
    map.insert("pet", "whois.nic.pet");
    map.insert("photo", "whois.nic.photo");
    map.insert("photography", "whois.nic.photography");
    map.insert("photos", "whois.nic.photos");
    map.insert("pics", "whois.nic.pics");
    map.insert("pictures", "whois.nic.pictures");
    map.insert("pink", "whois.nic.pink");
    map.insert("pizza", "whois.nic.pizza");
    map.insert("place", "whois.nic.place");
    map.insert("plumbing", "whois.nic.plumbing");
    map.insert("plus", "whois.nic.plus");
    map.insert("poker", "whois.nic.poker");
    map.insert("porn", "whois.nic.porn");
    map.insert("press", "whois.nic.press");
    map.insert("productions", "whois.nic.productions");
    map.insert("promo", "whois.nic.promo");
    map.insert("properties", "whois.nic.properties");
    map.insert("property", "whois.nic.property");
    map.insert("pub", "whois.nic.pub");
    map.insert("racing", "whois.nic.racing");
    map.insert("recipes", "whois.nic.recipes");
    map.insert("red", "whois.nic.red");
    map.insert("rehab", "whois.nic.rehab");
    map.insert("reisen", "whois.nic.reisen");
    map.insert("rentals", "whois.nic.rentals");
    map.insert("repair", "whois.nic.repair");
    map.insert("report", "whois.nic.report");
    map.insert("republican", "whois.nic.republican");
    map.insert("rest", "whois.nic.rest");
    map.insert("restaurant", "whois.nic.restaurant");
    map.insert("review", "whois.nic.review");
    map.insert("reviews", "whois.nic.reviews");
    map.insert("rip", "whois.nic.rip");
    map.insert("rocks", "whois.nic.rocks");
    map.insert("run", "whois.nic.run");
    map.insert("sale", "whois.nic.sale");
    map.insert("salon", "whois.nic.salon");
    map.insert("sarl", "whois.nic.sarl");
    map.insert("school", "whois.nic.school");
    map.insert("science", "whois.nic.science");
    map.insert("security", "whois.nic.security");
    map.insert("services", "whois.nic.services");
    map.insert("sex", "whois.nic.sex");
    map.insert("sexy", "whois.nic.sexy");
    map.insert("shoes", "whois.nic.shoes");
    map.insert("show", "whois.nic.show");
    map.insert("singles", "whois.nic.singles");
    map.insert("ski", "whois.nic.ski");
    map.insert("soccer", "whois.nic.soccer");
    map.insert("social", "whois.nic.social");
    map.insert("software", "whois.nic.software");
    map.insert("solar", "whois.nic.solar");
    map.insert("solutions", "whois.nic.solutions");
    map.insert("space", "whois.nic.space");
    map.insert("storage", "whois.nic.storage");
    map.insert("studio", "whois.nic.studio");
    map.insert("style", "whois.nic.style");
    map.insert("sucks", "whois.nic.sucks");
    map.insert("supplies", "whois.nic.supplies");
    map.insert("supply", "whois.nic.supply");
    map.insert("support", "whois.nic.support");
    map.insert("surgery", "whois.nic.surgery");
    map.insert("systems", "whois.nic.systems");
    map.insert("tattoo", "whois.nic.tattoo");
    map.insert("tax", "whois.nic.tax");
    map.insert("taxi", "whois.nic.taxi");
    map.insert("team", "whois.nic.team");
    map.insert("tennis", "whois.nic.tennis");
    map.insert("theater", "whois.nic.theater");
    map.insert("theatre", "whois.nic.theatre");
    map.insert("tickets", "whois.nic.tickets");
    map.insert("tienda", "whois.nic.tienda");
    map.insert("tips", "whois.nic.tips");
    map.insert("tires", "whois.nic.tires");
    map.insert("today", "whois.nic.today");
    map.insert("tools", "whois.nic.tools");
    map.insert("tours", "whois.nic.tours");
    map.insert("town", "whois.nic.town");
    map.insert("toys", "whois.nic.toys");
    map.insert("trade", "whois.nic.trade");
    map.insert("trading", "whois.nic.trading");
    map.insert("training", "whois.nic.training");
    map.insert("tube", "whois.nic.tube");
    map.insert("university", "whois.nic.university");
    map.insert("uno", "whois.nic.uno");
    map.insert("vacations", "whois.nic.vacations");
    map.insert("vegas", "whois.nic.vegas");
    map.insert("ventures", "whois.nic.ventures");
    map.insert("vet", "whois.nic.vet");
    map.insert("viajes", "whois.nic.viajes");
    map.insert("video", "whois.nic.video");
    map.insert("villas", "whois.nic.villas");
    map.insert("vision", "whois.nic.vision");
    map.insert("voyage", "whois.nic.voyage");
    map.insert("watch", "whois.nic.watch");
    map.insert("webcam", "whois.nic.webcam");
    map.insert("website", "whois.nic.website");
    map.insert("wedding", "whois.nic.wedding");
    map.insert("whoswho", "whois.nic.whoswho");
    map.insert("win", "whois.nic.win");
    map.insert("wine", "whois.nic.wine");
    map.insert("work", "whois.nic.work");
    map.insert("works", "whois.nic.works");
    map.insert("world", "whois.nic.world");
    map.insert("wtf", "whois.nic.wtf");
    map.insert("zone", "whois.nic.zone");

    map
});

/// Authoritative WHOIS server for the TLD of `root_domain`.
pub fn server_for(root_domain: &str) -> &'static str {
    let tld = root_domain
        .trim_end_matches('.')
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    TLD_WHOIS_SERVERS
        .get(tld.as_str())
        .copied()
        .unwrap_or(FALLBACK_WHOIS_SERVER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_tlds() {
        assert_eq!(server_for("example.com"), "whois.verisign-grs.com");
        assert_eq!(server_for("example.net"), "whois.verisign-grs.com");
        assert_eq!(server_for("example.org"), "whois.pir.org");
        assert_eq!(server_for("example.de"), "whois.denic.de");
        assert_eq!(server_for("example.dev"), "whois.nic.google");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(server_for("EXAMPLE.COM"), "whois.verisign-grs.com");
        assert_eq!(server_for("example.Uk"), "whois.nic.uk");
    }

    #[test]
    fn test_unmapped_tld_falls_back_to_iana() {
        assert_eq!(server_for("example.zz"), FALLBACK_WHOIS_SERVER);
        assert_eq!(server_for(""), FALLBACK_WHOIS_SERVER);
        assert_eq!(server_for("localhost"), FALLBACK_WHOIS_SERVER);
    }

    #[test]
    fn test_every_entry_is_host_like() {
        for (tld, server) in TLD_WHOIS_SERVERS.iter() {
            assert_eq!(*tld, tld.to_ascii_lowercase());
            assert!(server.contains('.'), "{} maps to {}", tld, server);
        }
    }
}
